// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound selector parsing and matching.
//!
//! ## Grammar
//!
//! A selector is a comma-separated list of compounds. A compound is an
//! optional tag name (or `*`), followed by any number of `#id`, `.class`,
//! `[attr]`, and `[attr=value]` parts, with no whitespace inside a compound.
//! Attribute values may be bare identifiers or quoted with `'` or `"`.
//!
//! There are no combinators (descendant, child, sibling); an element matches a
//! selector when it matches any one compound in full. Tag names, ids, classes,
//! and attributes all compare case-sensitively.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::ElementData;

/// Error produced by [`Selector::parse`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SelectorError {
    /// The selector text (or one comma-separated alternative) is empty.
    #[error("empty selector")]
    Empty,
    /// A character that does not start a valid selector part.
    #[error("unexpected character {found:?} at byte {at}")]
    Unexpected {
        /// Byte offset into the selector text.
        at: usize,
        /// The offending character.
        found: char,
    },
    /// Selector text ended where a name was required.
    #[error("unexpected end of selector")]
    UnexpectedEnd,
    /// An attribute part (`[...]`) with no closing bracket.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

/// One attribute test of a compound: presence, or presence with a value.
#[derive(Clone, Debug, Eq, PartialEq)]
struct AttrTest {
    name: String,
    value: Option<String>,
}

/// One compound: every part must match for the compound to match.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Compound {
    tag: Option<String>, // None means universal
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn matches(&self, data: &ElementData) -> bool {
        if let Some(tag) = &self.tag
            && data.tag != *tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && data.id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| data.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|t| match &t.value {
            Some(v) => data.attr(&t.name) == Some(v.as_str()),
            None => data.attr(&t.name).is_some(),
        })
    }
}

/// A parsed selector: comma-separated alternation of compounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector {
    alts: Vec<Compound>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// ```
    /// use penumbra_dom::{ElementData, Selector};
    ///
    /// let sel = Selector::parse("button.primary[role=tab], #fallback").unwrap();
    /// let data = ElementData::new("button").with_class("primary").with_attr("role", "tab");
    /// assert!(sel.matches(&data));
    /// ```
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let mut alts = Vec::new();
        let mut offset = 0;
        for part in text.split(',') {
            let trimmed = part.trim();
            let at = offset + (part.len() - part.trim_start().len());
            alts.push(parse_compound(trimmed, at)?);
            offset += part.len() + 1; // account for the separating comma
        }
        Ok(Self { alts })
    }

    /// True if `data` matches any compound of this selector.
    pub fn matches(&self, data: &ElementData) -> bool {
        self.alts.iter().any(|c| c.matches(data))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Consume a nonempty identifier starting at `pos`; returns (ident, next pos).
fn take_ident(s: &str, pos: usize, base: usize) -> Result<(String, usize), SelectorError> {
    let rest = &s[pos..];
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(match rest.chars().next() {
            Some(found) => SelectorError::Unexpected {
                at: base + pos,
                found,
            },
            None => SelectorError::UnexpectedEnd,
        });
    }
    Ok((String::from(&rest[..end]), pos + end))
}

// TODO: quoted attribute values containing ']' or an escaped quote are not
// handled; this needs a real tokenizer if combinators ever land.
fn parse_compound(s: &str, base: usize) -> Result<Compound, SelectorError> {
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut out = Compound::default();
    let mut pos = 0;

    // Leading tag name or universal.
    if s.starts_with('*') {
        pos = 1;
    } else if s.chars().next().is_some_and(is_ident_char) {
        let (tag, next) = take_ident(s, 0, base)?;
        out.tag = Some(tag);
        pos = next;
    }

    while pos < s.len() {
        let c = s[pos..].chars().next().expect("pos is a char boundary");
        match c {
            '#' => {
                let (id, next) = take_ident(s, pos + 1, base)?;
                out.id = Some(id);
                pos = next;
            }
            '.' => {
                let (class, next) = take_ident(s, pos + 1, base)?;
                out.classes.push(class);
                pos = next;
            }
            '[' => {
                let close = s[pos..]
                    .find(']')
                    .ok_or(SelectorError::UnterminatedAttribute)?;
                let body = &s[pos + 1..pos + close];
                let test = match body.split_once('=') {
                    Some((name, value)) => {
                        let (name, _) = take_ident(name, 0, base + pos + 1)?;
                        AttrTest {
                            name,
                            value: Some(String::from(unquote(value))),
                        }
                    }
                    None => {
                        let (name, _) = take_ident(body, 0, base + pos + 1)?;
                        AttrTest { name, value: None }
                    }
                };
                out.attrs.push(test);
                pos += close + 1;
            }
            found => {
                return Err(SelectorError::Unexpected {
                    at: base + pos,
                    found,
                });
            }
        }
    }
    Ok(out)
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        &v[1..v.len() - 1]
    } else {
        v
    }
}
