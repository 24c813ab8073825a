//! nrtl DOM - Document Object Model
//!
//! Arena-based DOM tree with mutation journaling. This is the concrete
//! stand-in for the host page's DOM: the retrofit core only talks to it
//! through queries, attribute writes, and inline style writes.

mod node;
mod tree;
mod document;
mod mutation;

pub use node::{Node, NodeData, ElementData, TextData, Attribute, StyleDeclaration};
pub use tree::{DomTree, DomError, DomResult};
pub use document::Document;
pub use mutation::{
    MutationRecord, ObserverId, ObserverOptions, ObserverRegistry,
};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a real node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    /// Raw index value
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }
}
