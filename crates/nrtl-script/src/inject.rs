//! Style Injector
//!
//! Builds the one stylesheet the retrofit needs (font-face plus static
//! overrides) and appends it to <head>. Runs once per document; there
//! is no update or removal path.

use nrtl_dom::{Document, NodeId};
use nrtl_style::{Declaration, FontFace, RuleSet, Stylesheet};

use crate::config::{
    ResourceResolver, FONT_FAMILY, FONT_PATH_PREFIX, FONT_STACK, FONT_TTF_SUFFIX,
    FONT_WOFF2_SUFFIX,
};

/// Build and inject the custom font stylesheet. Returns the style
/// element's node id.
pub fn inject_custom_font_styles(doc: &mut Document, resolver: &dyn ResourceResolver) -> NodeId {
    let css = build_stylesheet(resolver).to_css();
    let style = doc.append_style_element(&css);
    tracing::info!(bytes = css.len(), "injected custom font stylesheet");
    style
}

fn build_stylesheet(resolver: &dyn ResourceResolver) -> Stylesheet {
    let ttf_url = resolver.resolve(&format!("{FONT_PATH_PREFIX}{FONT_TTF_SUFFIX}"));
    let woff2_url = resolver.resolve(&format!("{FONT_PATH_PREFIX}{FONT_WOFF2_SUFFIX}"));

    let mut sheet = Stylesheet::new();
    sheet.push_font_face(FontFace::new(FONT_FAMILY, &ttf_url, &woff2_url));

    // font-family override on root markers and common text tags
    sheet.push_rule(RuleSet::new(
        &[
            ".notion-page-content",
            ".notion-table-view",
            ".notion-board-view",
            ".notion-gallery-view",
            ".notion-page-block",
            ".notion-topbar",
            ".notion-body",
            ".notion-body h1",
            ".notion-body h2",
            ".notion-body h3",
            ".notion-body h4",
            ".notion-body h5",
            ".notion-body h6",
            ".notion-body p",
            ".notion-body span",
        ],
        vec![Declaration::important("font-family", FONT_STACK)],
    ));

    // static direction overrides
    sheet.push_rule(RuleSet::new(
        &[r#".notion-collection_view-block div[data-content-editable-void="true"] > div:nth-child(2)"#],
        vec![Declaration::important("direction", "rtl")],
    ));
    sheet.push_rule(RuleSet::new(
        &[".notion-view-settings-sidebar"],
        vec![Declaration::important("direction", "ltr")],
    ));
    sheet.push_rule(RuleSet::new(
        &[".notion-board-view"],
        vec![Declaration::important("float", "none")],
    ));

    sheet
}
