// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Penumbra Locator: depth-first element search across nested shadow trees.
//!
//! ## Overview
//!
//! Native lookups stop at shadow boundaries: an element inside a shadow tree is
//! invisible to a plain by-id or selector query run against the document. This
//! crate pierces those boundaries. Starting from any scope, it checks the scope
//! itself, then walks every descendant element in document order, descending
//! into each attached OPEN shadow tree it passes, recursively, until the target
//! is found or the reachable graph is exhausted.
//!
//! ## Inputs
//!
//! The search is generic over [`ScopeAccess`](crate::types::ScopeAccess), a
//! small seam any tree can implement: by-id lookup within a scope, pattern
//! matching within a scope, document-order enumeration of a scope's elements,
//! and the open shadow scope of an element (if any). The `dom_adapter` feature
//! implements the seam for `penumbra_dom` documents.
//!
//! ## Results
//!
//! Every hit is a [`Located`](crate::types::Located): the found node paired
//! with the scope that DIRECTLY contains it, which is usually not the scope
//! the search started from. Results are produced fresh on every call and never
//! cached; a caller that mutates the tree between calls simply searches again.
//!
//! ## Ordering
//!
//! - [`find_by_id`](crate::locate::find_by_id) returns the first match in
//!   depth-first order: the starting scope's own lookup first, then each
//!   descendant's shadow tree in turn. If the same identifier exists in
//!   several shadow trees, the first one discovered wins silently.
//! - [`find_all_matching`](crate::locate::find_all_matching) accumulates every
//!   match: a scope's direct matches first, then the nested shadow results in
//!   traversal order. Each element lives in exactly one scope, so no element
//!   can appear twice.
//!
//! ## Reachability
//!
//! Closed shadow trees never appear through
//! [`ScopeAccess::open_shadow_scope`](crate::types::ScopeAccess::open_shadow_scope),
//! so their contents cannot be searched. That is a permanent property of the
//! platform model, not a search limitation that could be lifted. Recursion is
//! always finite: a shadow tree's host is never inside its own shadow tree, so
//! every scope is visited at most once.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod locate;
pub mod types;

pub use locate::{find_all_matching, find_by_id, first_match};
pub use types::{Located, ScopeAccess};
