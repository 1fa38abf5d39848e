// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Penumbra DOM: an arena-backed element tree with shadow trees and scoped queries.
//!
//! ## Overview
//!
//! This crate models the host tree the rest of Penumbra searches: a [`Document`]
//! owning every element in a main tree plus any number of shadow trees attached
//! to host elements. Shadow trees come in two [`ShadowMode`]s; open trees are
//! reachable through [`Document::open_shadow_root`], closed trees are not,
//! which is the same visibility rule the web platform gives script.
//!
//! Queries are SCOPED: [`Document::element_by_id`], [`Document::query_all`],
//! and [`Document::descendants`] operate within one [`Scope`] (the main tree or
//! a single shadow tree) and never descend across a shadow boundary. Piercing
//! search across boundaries is a higher layer's job (see `penumbra_locator`).
//!
//! ## Node identity
//!
//! Nodes are addressed by [`NodeId`], a small generational handle. Removing a
//! node frees its slot; a later insert may reuse the slot with a bumped
//! generation, so stale ids never alias a live node. See the [`NodeId`] docs
//! for the exact semantics.
//!
//! ## Selectors
//!
//! [`Selector`] is a compound selector engine: tag or `*`, `#id`, `.class`,
//! `[attr]`, `[attr=value]` parts, with comma-separated alternation. There are
//! no combinators; this is the full grammar the query engine supports, and
//! nothing validates selector text beyond it.
//!
//! ### Minimal usage
//!
//! ```
//! use penumbra_dom::{Document, ElementData, Scope, Selector, ShadowMode};
//!
//! let mut doc = Document::new();
//! let app = doc.create_element(None, ElementData::new("main").with_id("app"));
//! let host = doc.create_element(Some(app), ElementData::new("x-panel"));
//!
//! // Attach an open shadow tree and populate it.
//! let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
//! let inner = doc.create_element(Some(shadow), ElementData::new("button").with_id("go"));
//!
//! // Scoped lookups do not cross the boundary.
//! assert_eq!(doc.element_by_id(Scope::Document, "app"), Some(app));
//! assert_eq!(doc.element_by_id(Scope::Document, "go"), None);
//! assert_eq!(doc.element_by_id(Scope::Shadow(shadow), "go"), Some(inner));
//!
//! let sel = Selector::parse("button#go").unwrap();
//! assert_eq!(doc.query_all(Scope::Shadow(shadow), &sel), vec![inner]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod selector;
pub mod tree;
pub mod types;

pub use selector::{Selector, SelectorError};
pub use tree::{AttachShadowError, Document};
pub use types::{ElementData, NodeId, Scope, ShadowMode};
