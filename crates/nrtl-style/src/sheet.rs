//! Stylesheet construction
//!
//! Builds the CSS text the retrofit injects into <head>. The output is
//! only ever handed to the rendering host as a style element's text;
//! nothing here parses CSS back.

use std::fmt::Write;

/// A @font-face rule: one family served in two encodings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    /// font-family name
    pub family: String,
    /// TrueType source URL
    pub truetype_url: String,
    /// WOFF2 source URL
    pub woff2_url: String,
}

impl FontFace {
    pub fn new(family: &str, truetype_url: &str, woff2_url: &str) -> Self {
        Self {
            family: family.to_string(),
            truetype_url: truetype_url.to_string(),
            woff2_url: woff2_url.to_string(),
        }
    }

    fn write_css(&self, out: &mut String) {
        let _ = write!(
            out,
            "@font-face {{\n  font-family: '{}';\n  src: url('{}') format('truetype'),\n       url('{}') format('woff2');\n  font-weight: normal;\n  font-style: normal;\n}}\n",
            self.family, self.truetype_url, self.woff2_url
        );
    }
}

/// CSS declaration (property: value [!important])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            important: false,
        }
    }

    pub fn important(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            important: true,
        }
    }
}

/// A rule: selector list plus declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl RuleSet {
    pub fn new(selectors: &[&str], declarations: Vec<Declaration>) -> Self {
        Self {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            declarations,
        }
    }

    fn write_css(&self, out: &mut String) {
        out.push_str(&self.selectors.join(",\n"));
        out.push_str(" {\n");
        for decl in &self.declarations {
            let bang = if decl.important { " !important" } else { "" };
            let _ = writeln!(out, "  {}: {}{};", decl.property, decl.value, bang);
        }
        out.push_str("}\n");
    }
}

/// Stylesheet under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub font_faces: Vec<FontFace>,
    pub rules: Vec<RuleSet>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_font_face(&mut self, face: FontFace) -> &mut Self {
        self.font_faces.push(face);
        self
    }

    pub fn push_rule(&mut self, rule: RuleSet) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Render to CSS text
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for face in &self.font_faces {
            face.write_css(&mut out);
        }
        for rule in &self.rules {
            rule.write_css(&mut out);
        }
        out
    }
}
