//! DOM Tree (arena-based allocation)
//!
//! All structural edits are journaled as mutation records so observers
//! can be fed after the fact, the way MutationObserver callbacks see
//! batched childList changes.

use crate::node::{Node, StyleDeclaration};
use crate::{MutationRecord, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error")]
    HierarchyRequest,
    /// Node is not a child of the given parent
    #[error("node is not a child")]
    NotAChild,
}

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Structural edits since the last `take_journal` call
    journal: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a document node
    pub fn create_document(&mut self) -> NodeId {
        self.alloc(Node::document())
    }

    /// Create an element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create an element node with a class attribute
    pub fn create_element_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.create_element(tag);
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_attr("class", class);
        }
        id
    }

    /// Create a text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    /// Append a child node, journaling the insertion
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if parent == child || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        // moving an attached node unlinks it from its old parent first
        let old_parent = self.get(child).map(|n| n.parent).unwrap_or(NodeId::NONE);
        if old_parent.is_valid() {
            self.remove_child(old_parent, child)?;
        }

        let prev_last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);
        {
            let node = self.get_mut(child).ok_or(DomError::NotFound)?;
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            if let Some(prev) = self.get_mut(prev_last) {
                prev.next_sibling = child;
            }
        }
        {
            let parent_node = self.get_mut(parent).ok_or(DomError::NotFound)?;
            if !parent_node.first_child.is_valid() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }

        self.journal.push(MutationRecord {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        Ok(child)
    }

    /// Remove a child node, journaling the removal
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let (prev, next, actual_parent) = {
            let node = self.get(child).ok_or(DomError::NotFound)?;
            (node.prev_sibling, node.next_sibling, node.parent)
        };
        if actual_parent != parent {
            return Err(DomError::NotAChild);
        }

        if prev.is_valid() {
            if let Some(n) = self.get_mut(prev) {
                n.next_sibling = next;
            }
        }
        if next.is_valid() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        }
        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child == child {
                parent_node.first_child = next;
            }
            if parent_node.last_child == child {
                parent_node.last_child = prev;
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }

        self.journal.push(MutationRecord {
            target: parent,
            added: Vec::new(),
            removed: vec![child],
        });
        Ok(child)
    }

    /// Iterate over direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self
            .get(id)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children { tree: self, next: first }
    }

    /// Collect all descendants of a node in document (preorder) order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for (child, _) in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Check whether `node` is inside the subtree rooted at `ancestor`
    /// (a node contains itself)
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Concatenated text of a node's subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for child in self.descendants(id) {
            if let Some(text) = self.get(child).and_then(|n| n.as_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.as_element()).map(|e| e.tag.as_str())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.as_element()).and_then(|e| e.get_attr(name))
    }

    /// Set an attribute. Writes against a missing or non-element node
    /// are silent no-ops: by the time a deferred pass runs, the target
    /// may already be gone.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_attr(name, value);
        }
    }

    /// Set an inline style property. Same no-op policy as `set_attribute`.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str, important: bool) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_style_property(property, value, important);
        }
    }

    /// Get an inline style declaration
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<&StyleDeclaration> {
        self.get(id)
            .and_then(|n| n.as_element())
            .and_then(|e| e.style_property(property))
    }

    /// Check class membership on an element
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_class(class))
    }

    /// All elements under `root` (inclusive) carrying the given class,
    /// in document order
    pub fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.has_class(root, class) {
            out.push(root);
        }
        for id in self.descendants(root) {
            if self.has_class(id, class) {
                out.push(id);
            }
        }
        out
    }

    /// Drain the structural-edit journal
    pub fn take_journal(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.journal)
    }

    /// Whether any unobserved structural edits are pending
    pub fn journal_is_empty(&self) -> bool {
        self.journal.is_empty()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let root = tree.create_document();
        let div = tree.create_element_with_class("div", "notion-page-content");
        tree.append_child(root, div).unwrap();
        (tree, root, div)
    }

    #[test]
    fn test_append_child_links() {
        let (mut tree, _root, div) = small_tree();
        let a = tree.create_element("span");
        let b = tree.create_element("span");
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();

        let children: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(children, vec![a, b]);
        assert_eq!(tree.get(a).unwrap().next_sibling, b);
        assert_eq!(tree.get(b).unwrap().prev_sibling, a);
    }

    #[test]
    fn test_append_ancestor_is_hierarchy_error() {
        let (mut tree, root, div) = small_tree();
        assert_eq!(tree.append_child(div, root), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_remove_child_detaches() {
        let (mut tree, _root, div) = small_tree();
        let a = tree.create_element("span");
        tree.append_child(div, a).unwrap();
        tree.remove_child(div, a).unwrap();

        assert_eq!(tree.children(div).count(), 0);
        assert!(!tree.get(a).unwrap().parent.is_valid());
        assert_eq!(tree.remove_child(div, a), Err(DomError::NotAChild));
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let (mut tree, _root, div) = small_tree();
        let inner = tree.create_element("span");
        let t1 = tree.create_text("hello ");
        let t2 = tree.create_text("سلام");
        tree.append_child(div, inner).unwrap();
        tree.append_child(inner, t1).unwrap();
        tree.append_child(div, t2).unwrap();

        assert_eq!(tree.text_content(div), "hello سلام");
    }

    #[test]
    fn test_get_elements_by_class_name() {
        let (mut tree, root, div) = small_tree();
        let inner = tree.create_element_with_class("div", "notion-page-content extra");
        tree.append_child(div, inner).unwrap();

        let found = tree.get_elements_by_class_name(root, "notion-page-content");
        assert_eq!(found, vec![div, inner]);
    }

    #[test]
    fn test_journal_records_edits_in_order() {
        let (mut tree, _root, div) = small_tree();
        let a = tree.create_element("span");
        tree.append_child(div, a).unwrap();
        tree.remove_child(div, a).unwrap();

        let journal = tree.take_journal();
        // the fixture's own append plus the two edits above
        assert_eq!(journal.len(), 3);
        assert_eq!(journal[1].added, vec![a]);
        assert_eq!(journal[2].removed, vec![a]);
        assert!(tree.journal_is_empty());
    }

    #[test]
    fn test_attribute_write_on_missing_node_is_noop() {
        let (mut tree, _root, _div) = small_tree();
        tree.set_attribute(NodeId::NONE, "dir", "rtl");
        tree.set_style_property(NodeId(9999), "text-align", "start", false);
    }
}
