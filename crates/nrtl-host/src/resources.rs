//! Extension resource resolution
//!
//! Maps a packaged relative path to an absolute loadable URL, the job
//! extension runtimes expose as getURL.

use nrtl_script::ResourceResolver;
use url::Url;

/// Resolver rooted at the extension's base URL
#[derive(Debug, Clone)]
pub struct ExtensionResources {
    base: Url,
}

impl ExtensionResources {
    /// Base must be an absolute URL; a trailing slash keeps joins
    /// inside the package
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }
}

impl ResourceResolver for ExtensionResources {
    fn resolve(&self, relative: &str) -> String {
        match self.base.join(relative) {
            Ok(url) => url.to_string(),
            // unresolvable path: fall back to the raw path so the CSS
            // font stack can still fall back to sans-serif
            Err(_) => relative.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_base_and_path() {
        let resources = ExtensionResources::new("extension://nrtl/").unwrap();
        assert_eq!(
            resources.resolve("assets/font/vazirmatn.woff2"),
            "extension://nrtl/assets/font/vazirmatn.woff2"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(ExtensionResources::new("not a url").is_err());
    }
}
