//! nrtl Style - Selectors & Stylesheet construction
//!
//! Two halves: a selector engine for the queries the retrofit runs
//! against the live tree, and a builder for the stylesheet it injects
//! into <head> (font-face plus static overrides).

mod selectors;
mod sheet;

pub use selectors::{
    query_all, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SelectorComponent, SelectorError, SelectorList,
};
pub use sheet::{Declaration, FontFace, RuleSet, Stylesheet};
