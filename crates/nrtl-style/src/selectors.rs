//! CSS Selector engine
//!
//! Parses and matches the selector subset the retrofit queries use:
//! type selectors, compound class selectors, attribute selectors
//! (presence and exact match), :not() over a compound, child and
//! descendant combinators, and comma-separated lists.

use nrtl_dom::{DomTree, NodeId};

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Empty selector or selector list entry
    #[error("empty selector")]
    Empty,
    /// Unexpected character at byte offset
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    /// Input ended inside a bracket or :not()
    #[error("unexpected end of selector")]
    UnexpectedEnd,
}

/// A comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// A selector with combinators, e.g. `.notion-page-content > div[data-block-id]`
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// Compounds left to right; the combinator precedes its compound
    /// (the first entry's combinator is ignored)
    pub parts: Vec<(Combinator, CompoundSelector)>,
}

/// Relationship between adjacent compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
}

/// One compound: components that must all match the same element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr] or [attr="value"]
    Attribute(AttributeSelector),
    /// Negation :not(<compound>)
    Not(Box<CompoundSelector>),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    /// None means presence test ([attr])
    pub expected: Option<String>,
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (&self.expected, value) {
            (None, Some(_)) => true,
            (Some(expected), Some(val)) => val == expected,
            (_, None) => false,
        }
    }
}

impl SelectorList {
    /// Parse a comma-separated selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut selectors = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::Empty);
            }
            selectors.push(ComplexSelector::parse(part)?);
        }
        if selectors.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { selectors })
    }

    /// Check whether an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }
}

impl ComplexSelector {
    /// Parse a single complex selector (no commas)
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(input);
        parser.parse_complex()
    }

    /// Match: rightmost compound against `node`, then walk ancestors
    /// per combinator
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some((_, last)) = self.parts.last() else {
            return false;
        };
        if !match_compound(tree, node, last) {
            return false;
        }
        match_ancestors(tree, node, &self.parts, self.parts.len() - 1)
    }
}

/// Match the chain to the left of `idx`, anchored at `node`
fn match_ancestors(
    tree: &DomTree,
    node: NodeId,
    parts: &[(Combinator, CompoundSelector)],
    idx: usize,
) -> bool {
    if idx == 0 {
        return true;
    }
    let combinator = parts[idx].0;
    let prev_compound = &parts[idx - 1].1;
    let parent = match tree.get(node) {
        Some(n) => n.parent,
        None => return false,
    };
    match combinator {
        Combinator::Child => {
            parent.is_valid()
                && match_compound(tree, parent, prev_compound)
                && match_ancestors(tree, parent, parts, idx - 1)
        }
        Combinator::Descendant => {
            let mut current = parent;
            while current.is_valid() {
                if match_compound(tree, current, prev_compound)
                    && match_ancestors(tree, current, parts, idx - 1)
                {
                    return true;
                }
                current = match tree.get(current) {
                    Some(n) => n.parent,
                    None => break,
                };
            }
            false
        }
    }
}

/// Match a compound selector against an element
fn match_compound(tree: &DomTree, node: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = tree.get(node).and_then(|n| n.as_element()) else {
        return false;
    };
    compound.components.iter().all(|component| match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => elem.tag.eq_ignore_ascii_case(tag),
        SelectorComponent::Class(class) => elem.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
        SelectorComponent::Not(inner) => !match_compound(tree, node, inner),
    })
}

/// All elements under `root` (exclusive) matching the list, in document order
pub fn query_all(tree: &DomTree, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
    let out: Vec<NodeId> = tree
        .descendants(root)
        .into_iter()
        .filter(|&id| list.matches(tree, id))
        .collect();
    tracing::trace!(selectors = list.selectors.len(), matches = out.len(), "query");
    out
}

struct Parser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts = Vec::new();
        let mut pending = Combinator::Descendant;
        loop {
            self.skip_whitespace_tracking(&mut pending);
            if self.chars.peek().is_none() {
                break;
            }
            let compound = self.parse_compound()?;
            parts.push((pending, compound));
            pending = Combinator::Descendant;
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(ComplexSelector { parts })
    }

    /// Consume whitespace and `>` between compounds. A bare `>` wins
    /// over surrounding whitespace.
    fn skip_whitespace_tracking(&mut self, pending: &mut Combinator) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else if ch == '>' {
                self.chars.next();
                *pending = Combinator::Child;
            } else {
                break;
            }
        }
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();
        while let Some(&(offset, ch)) = self.chars.peek() {
            match ch {
                '*' => {
                    self.chars.next();
                    components.push(SelectorComponent::Universal);
                }
                '.' => {
                    self.chars.next();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                '[' => {
                    self.chars.next();
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                ':' => {
                    self.chars.next();
                    components.push(self.parse_not(offset)?);
                }
                c if is_ident_char(c) => {
                    components.push(SelectorComponent::Type(self.parse_ident()?));
                }
                _ => break,
            }
        }
        if components.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(CompoundSelector { components })
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if is_ident_char(ch) {
                out.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        if out.is_empty() {
            Err(SelectorError::UnexpectedEnd)
        } else {
            Ok(out)
        }
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        let name = self.parse_ident()?;
        match self.chars.peek() {
            Some(&(_, ']')) => {
                self.chars.next();
                Ok(AttributeSelector { name, expected: None })
            }
            Some(&(_, '=')) => {
                self.chars.next();
                let expected = self.parse_attr_value()?;
                match self.chars.next() {
                    Some((_, ']')) => Ok(AttributeSelector {
                        name,
                        expected: Some(expected),
                    }),
                    Some((offset, ch)) => Err(SelectorError::UnexpectedChar { ch, offset }),
                    None => Err(SelectorError::UnexpectedEnd),
                }
            }
            Some(&(offset, ch)) => Err(SelectorError::UnexpectedChar { ch, offset }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn parse_attr_value(&mut self) -> Result<String, SelectorError> {
        match self.chars.peek() {
            Some(&(_, quote @ ('"' | '\''))) => {
                self.chars.next();
                let mut out = String::new();
                for (_, ch) in self.chars.by_ref() {
                    if ch == quote {
                        return Ok(out);
                    }
                    out.push(ch);
                }
                Err(SelectorError::UnexpectedEnd)
            }
            Some(_) => self.parse_ident(),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn parse_not(&mut self, offset: usize) -> Result<SelectorComponent, SelectorError> {
        let name = self.parse_ident()?;
        if !name.eq_ignore_ascii_case("not") {
            return Err(SelectorError::UnexpectedChar {
                ch: self.input[offset..].chars().next().unwrap_or(':'),
                offset,
            });
        }
        match self.chars.next() {
            Some((_, '(')) => {}
            Some((offset, ch)) => return Err(SelectorError::UnexpectedChar { ch, offset }),
            None => return Err(SelectorError::UnexpectedEnd),
        }
        let inner = self.parse_compound()?;
        match self.chars.next() {
            Some((_, ')')) => Ok(SelectorComponent::Not(Box::new(inner))),
            Some((offset, ch)) => Err(SelectorError::UnexpectedChar { ch, offset }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrtl_dom::Document;

    #[test]
    fn test_parse_class_list() {
        let list = SelectorList::parse(".notion-page-content, .notion-table-view").unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(
            list.selectors[0].parts[0].1.components,
            vec![SelectorComponent::Class("notion-page-content".to_string())]
        );
    }

    #[test]
    fn test_parse_compound_with_attribute() {
        let list = SelectorList::parse(r#"div[placeholder="To-do"]"#).unwrap();
        let compound = &list.selectors[0].parts[0].1;
        assert_eq!(compound.components.len(), 2);
        assert_eq!(
            compound.components[1],
            SelectorComponent::Attribute(AttributeSelector {
                name: "placeholder".to_string(),
                expected: Some("To-do".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_child_combinator_and_not() {
        let list =
            SelectorList::parse(".notion-page-content > div[data-block-id]").unwrap();
        let complex = &list.selectors[0];
        assert_eq!(complex.parts.len(), 2);
        assert_eq!(complex.parts[1].0, Combinator::Child);

        let list = SelectorList::parse(".notion-table-view:not([dir])").unwrap();
        let compound = &list.selectors[0].parts[0].1;
        assert!(matches!(compound.components[1], SelectorComponent::Not(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse("div[unterminated").is_err());
        assert!(SelectorList::parse(":hover").is_err());
    }

    fn fixture() -> (Document, nrtl_dom::NodeId, nrtl_dom::NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let content = doc
            .tree_mut()
            .create_element_with_class("div", "notion-page-content");
        let block = doc.tree_mut().create_element("div");
        doc.tree_mut().set_attribute(block, "data-block-id", "abc123");
        doc.tree_mut().append_child(body, content).unwrap();
        doc.tree_mut().append_child(content, block).unwrap();
        (doc, content, block)
    }

    #[test]
    fn test_match_child_combinator() {
        let (doc, _content, block) = fixture();
        let list = SelectorList::parse(".notion-page-content > div[data-block-id]").unwrap();
        assert!(list.matches(doc.tree(), block));
    }

    #[test]
    fn test_match_descendant_combinator() {
        let (mut doc, _content, block) = fixture();
        let deep = doc.tree_mut().create_element_with_class("span", "leaf");
        doc.tree_mut().append_child(block, deep).unwrap();

        let list = SelectorList::parse(".notion-page-content .leaf").unwrap();
        assert!(list.matches(doc.tree(), deep));
        let list = SelectorList::parse(".notion-page-content > .leaf").unwrap();
        assert!(!list.matches(doc.tree(), deep));
    }

    #[test]
    fn test_match_not_dir() {
        let (mut doc, content, _block) = fixture();
        let list = SelectorList::parse(".notion-page-content:not([dir])").unwrap();
        assert!(list.matches(doc.tree(), content));

        doc.tree_mut().set_attribute(content, "dir", "auto");
        assert!(!list.matches(doc.tree(), content));
    }

    #[test]
    fn test_query_all_document_order() {
        let (mut doc, content, block) = fixture();
        let second = doc.tree_mut().create_element("div");
        doc.tree_mut().set_attribute(second, "data-block-id", "def456");
        doc.tree_mut().append_child(content, second).unwrap();

        let list = SelectorList::parse("div[data-block-id]").unwrap();
        let found = query_all(doc.tree(), doc.root(), &list);
        assert_eq!(found, vec![block, second]);
    }

    #[test]
    fn test_query_all_no_match_is_empty() {
        let (doc, _, _) = fixture();
        let list = SelectorList::parse(".notion-board-view").unwrap();
        assert!(query_all(doc.tree(), doc.root(), &list).is_empty());
    }
}
