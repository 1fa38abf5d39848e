// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search implementation.
//!
//! ## Overview
//!
//! Both searches follow the same shape: consult the starting scope directly,
//! then walk its elements in document order and recurse into every attached
//! open shadow scope. The by-id search stops at the first hit; the pattern
//! search accumulates everything.
//!
//! ## Ordering
//!
//! - By-id: first match in depth-first, document-order traversal wins. A
//!   duplicate identifier in a later shadow tree is silently shadowed by an
//!   earlier one.
//! - By-pattern: a scope's direct matches come before any nested shadow
//!   matches, and shadow trees are visited in their hosts' document order.
//!
//! ## See Also
//!
//! [`crate::adapters`] for the `penumbra_dom` implementation of the seam.

use alloc::vec::Vec;

use crate::types::{Located, ScopeAccess};

/// Find one element by identifier, searching `scope` and every open shadow
/// tree reachable beneath it.
///
/// Returns the element together with the scope directly containing it, or
/// `None` if the identifier is absent everywhere reachable.
pub fn find_by_id<T: ScopeAccess>(
    tree: &T,
    id: &str,
    scope: T::ScopeRef,
) -> Option<Located<T::Node, T::ScopeRef>> {
    if let Some(node) = tree.element_by_id(scope, id) {
        return Some(Located { node, scope });
    }
    for element in tree.descendants(scope) {
        if let Some(shadow) = tree.open_shadow_scope(element)
            && let Some(found) = find_by_id(tree, id, shadow)
        {
            return Some(found);
        }
    }
    None
}

/// Find every element matching `pattern`, searching `scope` and every open
/// shadow tree reachable beneath it.
///
/// The result is a finite, ordered collection: direct matches of a scope
/// first, then each descendant's shadow results in traversal order, whether or
/// not the descendant itself matched. Empty when nothing matches.
pub fn find_all_matching<T: ScopeAccess>(
    tree: &T,
    pattern: &T::Pattern,
    scope: T::ScopeRef,
) -> Vec<Located<T::Node, T::ScopeRef>> {
    let mut out: Vec<Located<T::Node, T::ScopeRef>> = tree
        .matching(scope, pattern)
        .into_iter()
        .map(|node| Located { node, scope })
        .collect();
    for element in tree.descendants(scope) {
        if let Some(shadow) = tree.open_shadow_scope(element) {
            out.extend(find_all_matching(tree, pattern, shadow));
        }
    }
    out
}

/// The first element matching `pattern` in traversal order, discarding the
/// rest.
///
/// This is the selection policy dispatchers use when a pattern may match many
/// elements but exactly one target is needed. There is no tie-break
/// configuration; the traversal order decides.
pub fn first_match<T: ScopeAccess>(
    tree: &T,
    pattern: &T::Pattern,
    scope: T::ScopeRef,
) -> Option<Located<T::Node, T::ScopeRef>> {
    find_all_matching(tree, pattern, scope).into_iter().next()
}
