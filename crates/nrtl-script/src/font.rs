//! Font Applier
//!
//! Forces the custom font stack onto every root-marker element as an
//! inline override. Safe to run on every pass.

use nrtl_dom::Document;
use nrtl_style::query_all;

use crate::config::{SelectorGroups, FONT_STACK};

/// Set an inline `font-family: vazirmatn, sans-serif !important` on all
/// root-marker elements. Idempotent.
pub fn apply_custom_font(doc: &mut Document, groups: &SelectorGroups) {
    let targets = query_all(doc.tree(), doc.root(), &groups.root_markers);
    tracing::debug!(count = targets.len(), "applying custom font");
    for id in targets {
        doc.tree_mut()
            .set_style_property(id, "font-family", FONT_STACK, true);
    }
}
