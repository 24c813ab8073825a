//! Fixed configuration
//!
//! Root markers, selector groups, and font resources are immutable
//! tables; nothing here changes at runtime.

use nrtl_style::{SelectorError, SelectorList};

/// Injected font family name
pub const FONT_FAMILY: &str = "vazirmatn";

/// Font stack written into inline font-family overrides
pub const FONT_STACK: &str = "vazirmatn, sans-serif";

/// Shared path prefix of the packaged font files
pub const FONT_PATH_PREFIX: &str = "assets/font/vazirmatn.";

/// TrueType suffix
pub const FONT_TTF_SUFFIX: &str = "ttf";

/// WOFF2 suffix
pub const FONT_WOFF2_SUFFIX: &str = "woff2";

/// Class names marking a subtree as a freshly loaded page root eligible
/// for font and direction treatment
pub const ROOT_MARKER_CLASSES: [&str; 11] = [
    "notion-page-content",
    "notion-table-view",
    "notion-board-view",
    "notion-gallery-view",
    "notion-page-block",
    "notion-topbar",
    "notion-body",
    "notion-selectable",
    "notion-collection_view-block",
    "notion-frame",
    "notion-collection-item",
];

/// List-item-like elements whose alignment should follow their
/// container (logical start, never a hardcoded side)
pub const LIST_ITEMS: &str = r#"div[placeholder="List"], div[placeholder="To-do"], div[placeholder="Toggle"], div[role="button"], div[dir="auto"], div[placeholder="Untitled"], div[data-content-editable-void="true"], a[role="link"]"#;

/// Top-level content blocks that get automatic direction inference
pub const TOP_LEVEL_BLOCKS: &str = r#".notion-page-content > div[data-block-id],
[placeholder="Untitled"],
[placeholder="Heading 1"],
[placeholder="Heading 2"],
[placeholder="Heading 3"],
[placeholder="Heading 4"],
[placeholder="Heading 5"],
[placeholder="Heading 6"],
.notion-column-block > div[data-block-id],
.notion-selectable > div[data-block-id],
.notion-collection_view-block,
.notion-table-view:not([dir]),
.notion-board-view:not([dir]),
.notion-gallery-view:not([dir]),
.notion-page-block:not([dir]),
.notion-topbar:not([dir]),
.notion-body:not([dir]),
.notion-collection-item"#;

/// Elements that get an explicit rtl/ltr decision from their own text
pub const RTL_ELIGIBLE: &str = ".notion-collection-item";

/// Bulleted list blocks (content-scan pass: unconditional RTL)
pub const BULLETED_LIST_BLOCKS: &str = ".notion-selectable.notion-bulleted_list-block";

/// Table blocks (content-scan pass: RTL iff Arabic text inside)
pub const TABLE_BLOCKS: &str = ".notion-table-block";

/// To-do blocks (content-scan pass: RTL iff Arabic text inside)
pub const TODO_BLOCKS: &str = ".notion-to_do-block";

/// Resolves a packaged resource path to a loadable URL. Implemented by
/// the host; extension runtimes differ in mechanism but not meaning.
pub trait ResourceResolver {
    fn resolve(&self, relative: &str) -> String;
}

/// Selector list matching any root-marker class
pub fn root_marker_selector() -> String {
    ROOT_MARKER_CLASSES
        .iter()
        .map(|c| format!(".{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The selector groups, compiled once at startup
#[derive(Debug, Clone)]
pub struct SelectorGroups {
    pub root_markers: SelectorList,
    pub list_items: SelectorList,
    pub top_level_blocks: SelectorList,
    pub rtl_eligible: SelectorList,
    pub bulleted_list_blocks: SelectorList,
    pub table_blocks: SelectorList,
    pub todo_blocks: SelectorList,
}

impl SelectorGroups {
    /// Compile the fixed selector strings
    pub fn compile() -> Result<Self, SelectorError> {
        Ok(Self {
            root_markers: SelectorList::parse(&root_marker_selector())?,
            list_items: SelectorList::parse(LIST_ITEMS)?,
            top_level_blocks: SelectorList::parse(TOP_LEVEL_BLOCKS)?,
            rtl_eligible: SelectorList::parse(RTL_ELIGIBLE)?,
            bulleted_list_blocks: SelectorList::parse(BULLETED_LIST_BLOCKS)?,
            table_blocks: SelectorList::parse(TABLE_BLOCKS)?,
            todo_blocks: SelectorList::parse(TODO_BLOCKS)?,
        })
    }
}
