//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document node
    root: NodeId,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let root = tree.create_document();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // skeleton edits are not interesting to observers
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        tree.take_journal();

        Self {
            tree,
            root,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Append a <style> element containing the given CSS text to <head>
    pub fn append_style_element(&mut self, css: &str) -> NodeId {
        let style = self.tree.create_element("style");
        let text = self.tree.create_text(css);
        let _ = self.tree.append_child(style, text);
        let _ = self.tree.append_child(self.head_element, style);
        style
    }

    /// Number of <style> elements currently in <head>
    pub fn style_element_count(&self) -> usize {
        self.tree
            .children(self.head_element)
            .filter(|(_, n)| n.as_element().map(|e| e.tag.as_str()) == Some("style"))
            .count()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_structure() {
        let doc = Document::new();
        assert!(doc.head().is_valid());
        assert!(doc.body().is_valid());
        assert!(doc.tree().contains(doc.root(), doc.body()));
        assert!(doc.tree().journal_is_empty());
    }

    #[test]
    fn test_append_style_element() {
        let mut doc = Document::new();
        let style = doc.append_style_element("body { direction: rtl; }");
        assert_eq!(doc.style_element_count(), 1);
        assert_eq!(doc.tree().text_content(style), "body { direction: rtl; }");
    }
}
