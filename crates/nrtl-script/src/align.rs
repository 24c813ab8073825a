//! Block Aligner
//!
//! Reconciles direction and alignment for all known structural blocks
//! after a DOM change. Every step is idempotent; the whole pass can run
//! as often as mutations or key presses demand.

use nrtl_dom::{Document, NodeId};
use nrtl_style::query_all;

use crate::config::SelectorGroups;
use crate::detect::{contains_arabic, Direction};
use crate::font::apply_custom_font;

/// Direction/alignment reconciliation over the selector groups
#[derive(Debug)]
pub struct BlockAligner {
    groups: SelectorGroups,
}

impl BlockAligner {
    pub fn new(groups: SelectorGroups) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &SelectorGroups {
        &self.groups
    }

    /// The full alignment pass
    pub fn align_page_content(&self, doc: &mut Document) {
        tracing::debug!("alignment pass");
        self.set_blocks_direction_auto(doc);
        self.set_rtl_for_eligible(doc);
        self.align_list_items(doc);
        self.apply_rtl_to_blocks(doc);
        apply_custom_font(doc, &self.groups);
    }

    /// Top-level blocks defer direction to content inference
    fn set_blocks_direction_auto(&self, doc: &mut Document) {
        for id in self.select(doc, &self.groups.top_level_blocks) {
            doc.tree_mut().set_attribute(id, "dir", "auto");
        }
    }

    /// RTL-eligible elements get an explicit decision from their text,
    /// overriding inference
    fn set_rtl_for_eligible(&self, doc: &mut Document) {
        for id in self.select(doc, &self.groups.rtl_eligible) {
            let text = doc.tree().text_content(id);
            let direction = Direction::of(text.trim());
            doc.tree_mut().set_attribute(id, "dir", direction.as_str());
            doc.tree_mut()
                .set_style_property(id, "text-align", direction.alignment(), false);
        }
    }

    /// List-item-like elements align to logical start so they follow
    /// their container's direction
    fn align_list_items(&self, doc: &mut Document) {
        for id in self.select(doc, &self.groups.list_items) {
            doc.tree_mut()
                .set_style_property(id, "text-align", "start", false);
        }
    }

    /// Content-scan pass: bulleted lists are forced RTL; table and
    /// to-do blocks go RTL only when Arabic text is found inside
    pub fn apply_rtl_to_blocks(&self, doc: &mut Document) {
        for id in self.select(doc, &self.groups.bulleted_list_blocks) {
            doc.tree_mut().set_attribute(id, "dir", "rtl");
        }
        for id in self.select(doc, &self.groups.table_blocks) {
            self.mark_rtl_if_arabic(doc, id);
        }
        for id in self.select(doc, &self.groups.todo_blocks) {
            self.mark_rtl_if_arabic(doc, id);
        }
    }

    fn mark_rtl_if_arabic(&self, doc: &mut Document, id: NodeId) {
        if contains_arabic(&doc.tree().text_content(id)) {
            doc.tree_mut().set_attribute(id, "dir", "rtl");
        }
    }

    fn select(&self, doc: &Document, list: &nrtl_style::SelectorList) -> Vec<NodeId> {
        query_all(doc.tree(), doc.root(), list)
    }
}
