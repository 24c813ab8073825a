//! Mutation Pipeline
//!
//! Two observers drive the retrofit: a deep document observer that is
//! alive for the whole session, and a narrow page-root observer that is
//! re-targeted whenever a new page root shows up. Document batches are
//! queued and processed at idle time; the idle gate guarantees at most
//! one deferred callback is outstanding.

use nrtl_dom::{
    Document, DomTree, MutationRecord, NodeId, ObserverId, ObserverOptions, ObserverRegistry,
};

use crate::align::BlockAligner;
use crate::config::ROOT_MARKER_CLASSES;
use crate::detect::contains_arabic;

/// Coalescing scheduler gate: arm-if-not-armed, disarm on fire
#[derive(Debug, Default)]
pub struct IdleGate {
    armed: bool,
}

impl IdleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate. Returns true only when the gate was not already
    /// armed, i.e. the host should schedule exactly one idle callback.
    pub fn arm(&mut self) -> bool {
        if self.armed {
            false
        } else {
            self.armed = true;
            true
        }
    }

    /// Fire the gate. Returns false for a spurious fire.
    pub fn fire(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Keyboard input relevant to the retrofit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

/// The mutation pipeline state machine
#[derive(Debug)]
pub struct MutationPipeline {
    /// Batches accumulated since the last idle flush
    queue: Vec<Vec<MutationRecord>>,
    idle: IdleGate,
    document_observer: ObserverId,
    page_root_observer: Option<ObserverId>,
    aligner: BlockAligner,
}

impl MutationPipeline {
    /// Attach the document observer and build the pipeline
    pub fn new(
        registry: &mut ObserverRegistry,
        document_root: NodeId,
        aligner: BlockAligner,
    ) -> Self {
        let document_observer = registry.observe(document_root, ObserverOptions::DEEP);
        Self {
            queue: Vec::new(),
            idle: IdleGate::new(),
            document_observer,
            page_root_observer: None,
            aligner,
        }
    }

    /// Handle of the whole-document observer
    pub fn document_observer(&self) -> ObserverId {
        self.document_observer
    }

    /// Handle of the narrow page-root observer, once one exists
    pub fn page_root_observer(&self) -> Option<ObserverId> {
        self.page_root_observer
    }

    pub fn aligner(&self) -> &BlockAligner {
        &self.aligner
    }

    /// Number of batches awaiting the idle flush
    pub fn queued_batches(&self) -> usize {
        self.queue.len()
    }

    pub fn idle_requested(&self) -> bool {
        self.idle.is_armed()
    }

    /// One document-observer callback: queue the batch. Returns true
    /// when the host should schedule an idle callback (queue was empty
    /// and none is outstanding).
    pub fn on_document_batch(&mut self, batch: Vec<MutationRecord>) -> bool {
        let schedule = self.queue.is_empty() && self.idle.arm();
        self.queue.push(batch);
        schedule
    }

    /// The idle callback: drain every queued batch, mark freshly
    /// inserted Arabic text, and re-target the page-root observer when
    /// a batch carried a new page root. The queue is cleared whether or
    /// not anything matched.
    pub fn run_idle(&mut self, doc: &mut Document, registry: &mut ObserverRegistry) {
        self.idle.fire();
        let batches = std::mem::take(&mut self.queue);
        tracing::debug!(batches = batches.len(), "idle flush");

        for batch in &batches {
            for record in batch {
                self.mark_inserted_text(doc, record);
                let Some(&first) = record.added.first() else {
                    continue;
                };
                if let Some(page_root) = find_page_root(doc.tree(), first) {
                    self.aligner.align_page_content(doc);
                    self.retarget_page_root(registry, page_root);
                }
            }
        }
    }

    /// Inserted text nodes that carry Arabic script flip their parent
    /// to rtl immediately, even when no selector group covers it
    fn mark_inserted_text(&self, doc: &mut Document, record: &MutationRecord) {
        let mut parents = Vec::new();
        for &added in &record.added {
            let Some(node) = doc.tree().get(added) else {
                continue;
            };
            if let Some(text) = node.as_text() {
                if contains_arabic(text) && node.parent.is_valid() {
                    parents.push(node.parent);
                }
            }
        }
        for parent in parents {
            doc.tree_mut().set_attribute(parent, "dir", "rtl");
        }
    }

    fn retarget_page_root(&mut self, registry: &mut ObserverRegistry, page_root: NodeId) {
        match self.page_root_observer {
            Some(id) => registry.reobserve(id, page_root, ObserverOptions::SHALLOW),
            None => {
                self.page_root_observer =
                    Some(registry.observe(page_root, ObserverOptions::SHALLOW));
            }
        }
        tracing::info!(?page_root, "page root observed");
    }

    /// The narrow observer fired: in-place edit under the current page
    /// root, realign everything
    pub fn on_page_root_batch(&self, doc: &mut Document) {
        self.aligner.align_page_content(doc);
    }

    /// Enter and Space compensate for editor actions that outrun the
    /// observer
    pub fn on_key(&self, key: Key, doc: &mut Document) {
        if matches!(key, Key::Enter | Key::Space) {
            self.aligner.align_page_content(doc);
        }
    }
}

/// Find a page root at or under `node`: the node itself if it carries a
/// root-marker class, else the first marked descendant
pub fn find_page_root(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    if tree.get(node)?.as_element().is_none() {
        return None;
    }
    for class in ROOT_MARKER_CLASSES {
        if let Some(&found) = tree.get_elements_by_class_name(node, class).first() {
            return Some(found);
        }
    }
    None
}
