//! End-to-end tests for the retrofit pipeline
//!
//! Drives a document the way a host page would: structural edits,
//! observer delivery, idle callbacks, and key presses.

use nrtl_dom::{Document, NodeId, ObserverRegistry};
use nrtl_script::{config::ResourceResolver, Key, Session};

struct ExtResolver;

impl ResourceResolver for ExtResolver {
    fn resolve(&self, relative: &str) -> String {
        format!("extension://nrtl/{relative}")
    }
}

struct Harness {
    doc: Document,
    registry: ObserverRegistry,
    session: Session,
    idle_pending: bool,
}

impl Harness {
    fn new() -> Self {
        let mut doc = Document::new();
        let mut registry = ObserverRegistry::new();
        let session = Session::start(&mut doc, &mut registry, &ExtResolver).unwrap();
        Self {
            doc,
            registry,
            session,
            idle_pending: false,
        }
    }

    /// Deliver journaled edits to observers and fire the resulting
    /// callbacks, like the host event loop between tasks
    fn pump(&mut self) {
        let journal = self.doc.tree_mut().take_journal();
        self.registry.deliver(self.doc.tree(), &journal);

        if let Some(batch) = self.registry.take_batch(self.session.document_observer()) {
            if self.session.on_document_batch(batch) {
                assert!(!self.idle_pending, "host saw a second idle request");
                self.idle_pending = true;
            }
        }
        if let Some(narrow) = self.session.page_root_observer() {
            if self.registry.take_batch(narrow).is_some() {
                self.session.on_page_root_batch(&mut self.doc);
            }
        }
    }

    /// The browser got around to being idle
    fn go_idle(&mut self) {
        self.idle_pending = false;
        self.session.run_idle(&mut self.doc, &mut self.registry);
    }

    fn append_block(&mut self, parent: NodeId, class: &str, text: &str) -> NodeId {
        let block = self.doc.tree_mut().create_element_with_class("div", class);
        let text_node = self.doc.tree_mut().create_text(text);
        self.doc.tree_mut().append_child(block, text_node).unwrap();
        self.doc.tree_mut().append_child(parent, block).unwrap();
        block
    }
}

#[test]
fn test_arabic_todo_block_goes_rtl_end_to_end() {
    let mut h = Harness::new();
    let body = h.doc.body();
    let frame = h.doc.tree_mut().create_element_with_class("div", "notion-frame");
    h.doc.tree_mut().append_child(body, frame).unwrap();
    let todo = h.append_block(frame, "notion-to_do-block", "مرحبا");

    h.pump();
    assert!(h.idle_pending);
    h.go_idle();

    assert_eq!(h.doc.tree().get_attribute(todo, "dir"), Some("rtl"));
}

#[test]
fn test_latin_todo_block_stays_ltr_end_to_end() {
    let mut h = Harness::new();
    let body = h.doc.body();
    let frame = h.doc.tree_mut().create_element_with_class("div", "notion-frame");
    h.doc.tree_mut().append_child(body, frame).unwrap();
    let todo = h.append_block(frame, "notion-to_do-block", "hello");

    h.pump();
    h.go_idle();

    assert_ne!(h.doc.tree().get_attribute(todo, "dir"), Some("rtl"));
}

#[test]
fn test_n_batches_drained_in_one_idle() {
    let mut h = Harness::new();
    let body = h.doc.body();

    // five observer callbacks fire before the idle callback runs
    let mut blocks = Vec::new();
    for i in 0..5 {
        let text = if i % 2 == 0 { "سلام" } else { "hello" };
        let frame = h
            .doc
            .tree_mut()
            .create_element_with_class("div", "notion-frame");
        h.doc.tree_mut().append_child(body, frame).unwrap();
        blocks.push(h.append_block(frame, "notion-to_do-block", text));
        h.pump();
    }
    assert!(h.idle_pending);

    h.go_idle();

    // every batch was visited: all Arabic blocks aligned, queue empty
    for (i, block) in blocks.iter().enumerate() {
        let dir = h.doc.tree().get_attribute(*block, "dir");
        if i % 2 == 0 {
            assert_eq!(dir, Some("rtl"), "block {i} missed in drain");
        } else {
            assert_ne!(dir, Some("rtl"));
        }
    }

    // nothing left pending: the next mutation schedules a fresh idle
    let frame = h
        .doc
        .tree_mut()
        .create_element_with_class("div", "notion-frame");
    h.doc.tree_mut().append_child(body, frame).unwrap();
    h.pump();
    assert!(h.idle_pending);
}

#[test]
fn test_page_root_observer_attached_to_detected_root() {
    let mut h = Harness::new();
    let body = h.doc.body();
    let content = h
        .doc
        .tree_mut()
        .create_element_with_class("div", "notion-page-content");
    h.doc.tree_mut().append_child(body, content).unwrap();

    h.pump();
    h.go_idle();

    let narrow = h.session.page_root_observer().expect("narrow observer");
    assert_eq!(h.registry.target_of(narrow), Some(content));

    // direct child insert under the page root triggers realignment
    let todo = h.append_block(content, "notion-to_do-block", "مرحبا");
    h.pump();
    assert_eq!(h.doc.tree().get_attribute(todo, "dir"), Some("rtl"));
}

#[test]
fn test_retargeting_moves_narrow_observer() {
    let mut h = Harness::new();
    let body = h.doc.body();

    let first = h
        .doc
        .tree_mut()
        .create_element_with_class("div", "notion-page-content");
    h.doc.tree_mut().append_child(body, first).unwrap();
    h.pump();
    h.go_idle();
    let narrow = h.session.page_root_observer().unwrap();
    assert_eq!(h.registry.target_of(narrow), Some(first));

    let second = h
        .doc
        .tree_mut()
        .create_element_with_class("div", "notion-page-content");
    h.doc.tree_mut().append_child(body, second).unwrap();
    h.pump();
    h.go_idle();

    assert_eq!(h.session.page_root_observer(), Some(narrow));
    assert_eq!(h.registry.target_of(narrow), Some(second));
}

#[test]
fn test_key_press_compensates_for_missed_mutation() {
    let mut h = Harness::new();
    let body = h.doc.body();

    // content lands without its journal ever reaching the observer
    let todo = h.append_block(body, "notion-to_do-block", "مرحبا");
    h.doc.tree_mut().take_journal();

    h.session.on_key(Key::Space, &mut h.doc);
    assert_eq!(h.doc.tree().get_attribute(todo, "dir"), Some("rtl"));
}

#[test]
fn test_inserted_arabic_text_marks_parent_paragraph() {
    let mut h = Harness::new();
    let body = h.doc.body();
    let para = h.doc.tree_mut().create_element("p");
    h.doc.tree_mut().append_child(body, para).unwrap();
    h.pump();
    h.go_idle();

    let text = h.doc.tree_mut().create_text("نص عربي");
    h.doc.tree_mut().append_child(para, text).unwrap();
    h.pump();
    h.go_idle();

    assert_eq!(h.doc.tree().get_attribute(para, "dir"), Some("rtl"));
}
