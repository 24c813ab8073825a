//! nrtl Script - RTL retrofit core
//!
//! Retrofits right-to-left direction and a custom font onto a
//! Notion-like document tree as content appears: detect Arabic-script
//! text, flip direction/alignment on the affected structural blocks,
//! and overlay the Vazirmatn font family.
//!
//! # Example
//! ```rust,ignore
//! use nrtl_script::{Session, config::ResourceResolver};
//!
//! let mut session = Session::start(&mut doc, &mut registry, &resolver)?;
//! // host loop: feed observer batches, fire idle callbacks, forward keys
//! ```

pub mod config;
pub mod detect;

mod align;
mod font;
mod inject;
mod pipeline;
mod session;

pub use align::BlockAligner;
pub use config::{ResourceResolver, SelectorGroups};
pub use detect::{contains_arabic, Direction};
pub use font::apply_custom_font;
pub use inject::inject_custom_font_styles;
pub use pipeline::{IdleGate, Key, MutationPipeline};
pub use session::{ScriptError, Session};
