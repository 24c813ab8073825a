//! nrtl Host - demo driver
//!
//! Builds a Notion-like page, feeds it Arabic and Latin content the way
//! an editor session would, and logs what the retrofit did to it.

use anyhow::Result;
use nrtl_host::{ExtensionResources, Host};
use nrtl_script::Key;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "extension://nrtl/".to_string());
    let resources = ExtensionResources::new(&base)?;
    let mut host = Host::new(&resources)?;

    // page chrome arrives first
    let body = host.doc().body();
    let frame = host
        .doc_mut()
        .tree_mut()
        .create_element_with_class("div", "notion-frame");
    host.doc_mut().tree_mut().append_child(body, frame)?;
    let content = host
        .doc_mut()
        .tree_mut()
        .create_element_with_class("div", "notion-page-content");
    host.doc_mut().tree_mut().append_child(frame, content)?;
    host.pump();
    host.run_idle();

    // the user writes a mixed page
    let arabic_todo = host.insert_block(content, "notion-to_do-block", "مهمة اليوم");
    let latin_todo = host.insert_block(content, "notion-to_do-block", "ship the release");
    let bullets = host.insert_block(
        content,
        "notion-selectable notion-bulleted_list-block",
        "نقطة أولى",
    );
    let item = host.insert_block(content, "notion-collection-item", "مسودة");
    host.pump();
    host.run_idle();

    // an Enter press lands content the observer never saw
    let late = host.insert_block(content, "notion-to_do-block", "عنصر متأخر");
    host.doc_mut().tree_mut().take_journal();
    host.press(Key::Enter);

    for (label, id) in [
        ("arabic to-do", arabic_todo),
        ("latin to-do", latin_todo),
        ("bulleted list", bullets),
        ("collection item", item),
        ("late insert", late),
    ] {
        tracing::info!(
            label,
            dir = host.doc().tree().get_attribute(id, "dir").unwrap_or("-"),
            align = host
                .doc()
                .tree()
                .style_property(id, "text-align")
                .map(|d| d.value.as_str())
                .unwrap_or("-"),
            "retrofit result"
        );
    }

    Ok(())
}
