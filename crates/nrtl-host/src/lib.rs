//! nrtl Host - host environment adapter
//!
//! Stands in for the browser side of the retrofit: resolves packaged
//! resources to URLs and pumps observer batches, idle callbacks, and
//! key presses into the session the way a page event loop would.

mod resources;

pub use resources::ExtensionResources;

use anyhow::Result;
use nrtl_dom::{Document, NodeId, ObserverRegistry};
use nrtl_script::{Key, Session};

/// One hosted document plus its retrofit session
pub struct Host {
    doc: Document,
    registry: ObserverRegistry,
    session: Session,
    idle_pending: bool,
}

impl Host {
    /// Load an empty document and start the retrofit against it
    pub fn new(resources: &ExtensionResources) -> Result<Self> {
        let mut doc = Document::new();
        let mut registry = ObserverRegistry::new();
        let session = Session::start(&mut doc, &mut registry, resources)?;
        Ok(Self {
            doc,
            registry,
            session,
            idle_pending: false,
        })
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Whether the pipeline asked for an idle callback that has not
    /// fired yet
    pub fn idle_pending(&self) -> bool {
        self.idle_pending
    }

    /// Route journaled DOM edits to observers and fire their callbacks
    pub fn pump(&mut self) {
        let journal = self.doc.tree_mut().take_journal();
        if journal.is_empty() {
            return;
        }
        self.registry.deliver(self.doc.tree(), &journal);

        if let Some(batch) = self.registry.take_batch(self.session.document_observer()) {
            if self.session.on_document_batch(batch) {
                self.idle_pending = true;
            }
        }
        if let Some(narrow) = self.session.page_root_observer() {
            if self.registry.take_batch(narrow).is_some() {
                self.session.on_page_root_batch(&mut self.doc);
            }
        }
    }

    /// Fire the idle callback if one was requested
    pub fn run_idle(&mut self) {
        if !self.idle_pending {
            return;
        }
        self.idle_pending = false;
        self.session.run_idle(&mut self.doc, &mut self.registry);
    }

    /// Forward a key press to the session
    pub fn press(&mut self, key: Key) {
        self.session.on_key(key, &mut self.doc);
    }

    /// Convenience for demo/test content: a classed div with one text
    /// child, appended and left for the next pump
    pub fn insert_block(&mut self, parent: NodeId, class: &str, text: &str) -> NodeId {
        let block = self.doc.tree_mut().create_element_with_class("div", class);
        let text_node = self.doc.tree_mut().create_text(text);
        let _ = self.doc.tree_mut().append_child(block, text_node);
        let _ = self.doc.tree_mut().append_child(parent, block);
        block
    }
}
