// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document tree: node identifiers, shadow modes, scopes,
//! and element data.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a
/// `NodeId` still refers to a live node. Stale `NodeId`s never alias a
/// different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Encapsulation mode of a shadow tree.
///
/// Open trees are reachable through
/// [`Document::open_shadow_root`](crate::Document::open_shadow_root); closed
/// trees are not reachable through any accessor once attached, which makes
/// their contents invisible to every search built on this crate. That is a
/// property of the platform model, not a defect of the search.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShadowMode {
    /// Script-accessible shadow tree.
    Open,
    /// Encapsulated shadow tree; unreachable after attachment.
    Closed,
}

/// A tree scope: the main document tree or one shadow tree.
///
/// This is the "context" half of a locate result: the tree that directly
/// contains a found element, which may differ from the scope a search started
/// at. Scoped queries on [`Document`](crate::Document) take a `Scope` and never
/// leave it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// The main tree: every element not inside any shadow tree.
    Document,
    /// One shadow tree, identified by its shadow root node.
    Shadow(NodeId),
}

/// Per-element data: tag name, optional id, classes, and attributes.
///
/// Construction reads best through the `with_*` helpers:
///
/// ```
/// use penumbra_dom::ElementData;
///
/// let data = ElementData::new("input")
///     .with_id("email")
///     .with_class("field")
///     .with_attr("type", "email");
/// assert_eq!(data.attr("type"), Some("email"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, matched case-sensitively by selectors.
    pub tag: String,
    /// Identifier, the key [`Document::element_by_id`](crate::Document::element_by_id) matches on.
    pub id: Option<String>,
    /// Class list, in insertion order.
    pub classes: Vec<String>,
    /// Attribute name/value pairs, in insertion order.
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create element data with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the element identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Look up an attribute value by name. First match wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
