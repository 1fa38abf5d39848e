// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the locator: locate results and the scope-access seam.

use alloc::vec::Vec;

/// A located element paired with the scope that directly contains it.
///
/// Produced by [`find_by_id`](crate::locate::find_by_id) and
/// [`find_all_matching`](crate::locate::find_all_matching). The `scope` is the
/// tree the element actually lives in, which for a piercing search is usually
/// a nested shadow scope rather than the scope the search started at.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Located<N, S> {
    /// The found element.
    pub node: N,
    /// The scope directly containing it.
    pub scope: S,
}

/// Read access to one tree scope and the shadow scopes beneath it.
///
/// Implement this seam to make a tree searchable. All methods are scoped and
/// NON-piercing: they describe a single scope, and the locator does the
/// crossing. The tree must guarantee that shadow nesting is acyclic (a host is
/// never inside its own shadow tree) so recursion terminates.
pub trait ScopeAccess {
    /// Element handle. Small and copyable, like an arena id.
    type Node: Copy + Eq + core::fmt::Debug;
    /// Scope handle: the main tree or one shadow tree.
    type ScopeRef: Copy + Eq + core::fmt::Debug;
    /// Pattern matched by [`Self::matching`] (for a DOM, a parsed selector).
    type Pattern: ?Sized;

    /// First element of `scope` with the given identifier, in document order.
    fn element_by_id(&self, scope: Self::ScopeRef, id: &str) -> Option<Self::Node>;

    /// Every element of `scope` matching `pattern`, in document order.
    fn matching(&self, scope: Self::ScopeRef, pattern: &Self::Pattern) -> Vec<Self::Node>;

    /// Every element of `scope`, in document order, not crossing shadow
    /// boundaries.
    fn descendants(&self, scope: Self::ScopeRef) -> Vec<Self::Node>;

    /// The open shadow scope attached to `node`, if any. Closed shadow trees
    /// must never be reported here.
    fn open_shadow_scope(&self, node: Self::Node) -> Option<Self::ScopeRef>;
}
