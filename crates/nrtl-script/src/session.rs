//! Session - entry point wiring
//!
//! Runs once per document load: compile selector groups, attach the
//! document observer, inject the stylesheet, apply the font, and hand
//! the host the handles it needs to pump events in.

use nrtl_dom::{Document, NodeId, ObserverId, ObserverRegistry};

use crate::align::BlockAligner;
use crate::config::{ResourceResolver, SelectorGroups};
use crate::font::apply_custom_font;
use crate::inject::inject_custom_font_styles;
use crate::pipeline::{Key, MutationPipeline};

/// Retrofit startup error
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A fixed selector group failed to compile
    #[error("selector group compilation failed: {0}")]
    Selector(#[from] nrtl_style::SelectorError),
}

/// One document's retrofit session
pub struct Session {
    pipeline: MutationPipeline,
    style_element: NodeId,
}

impl Session {
    /// Wire up the retrofit for a freshly loaded document
    pub fn start(
        doc: &mut Document,
        registry: &mut ObserverRegistry,
        resolver: &dyn ResourceResolver,
    ) -> Result<Self, ScriptError> {
        let groups = SelectorGroups::compile()?;
        let aligner = BlockAligner::new(groups);
        let pipeline = MutationPipeline::new(registry, doc.root(), aligner);

        let style_element = inject_custom_font_styles(doc, resolver);
        apply_custom_font(doc, pipeline.aligner().groups());

        tracing::info!("retrofit session started");
        Ok(Self {
            pipeline,
            style_element,
        })
    }

    /// The injected style element
    pub fn style_element(&self) -> NodeId {
        self.style_element
    }

    /// Whole-document observer handle, for the host's pump loop
    pub fn document_observer(&self) -> ObserverId {
        self.pipeline.document_observer()
    }

    /// Narrow page-root observer handle, once a page root was seen
    pub fn page_root_observer(&self) -> Option<ObserverId> {
        self.pipeline.page_root_observer()
    }

    /// Forward one document-observer batch; true means the host should
    /// schedule an idle callback
    pub fn on_document_batch(&mut self, batch: Vec<nrtl_dom::MutationRecord>) -> bool {
        self.pipeline.on_document_batch(batch)
    }

    /// The idle callback
    pub fn run_idle(&mut self, doc: &mut Document, registry: &mut ObserverRegistry) {
        self.pipeline.run_idle(doc, registry);
    }

    /// Forward one page-root-observer batch
    pub fn on_page_root_batch(&mut self, doc: &mut Document) {
        self.pipeline.on_page_root_batch(doc);
    }

    /// Forward a key press
    pub fn on_key(&mut self, key: Key, doc: &mut Document) {
        self.pipeline.on_key(key, doc);
    }
}
