// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope access for `penumbra_dom` documents.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! The document's scoped queries map one-to-one onto the seam: `Scope` is the
//! scope handle, `NodeId` the element handle, and a parsed `Selector` the
//! pattern. Closed shadow trees never surface because the document's
//! `open_shadow_root` accessor does not report them.

use alloc::vec::Vec;

use penumbra_dom::{Document, NodeId, Scope, Selector};

use crate::types::ScopeAccess;

impl ScopeAccess for Document {
    type Node = NodeId;
    type ScopeRef = Scope;
    type Pattern = Selector;

    fn element_by_id(&self, scope: Scope, id: &str) -> Option<NodeId> {
        Self::element_by_id(self, scope, id)
    }

    fn matching(&self, scope: Scope, pattern: &Selector) -> Vec<NodeId> {
        self.query_all(scope, pattern)
    }

    fn descendants(&self, scope: Scope) -> Vec<NodeId> {
        Self::descendants(self, scope)
    }

    fn open_shadow_scope(&self, node: NodeId) -> Option<Scope> {
        self.open_shadow_root(node).map(Scope::Shadow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::{find_all_matching, find_by_id, first_match};
    use alloc::vec;
    use penumbra_dom::{ElementData, ShadowMode};

    /// Document with a two-deep open shadow chain and one closed pocket:
    ///
    /// ```text
    /// main#app
    /// ├─ x-outer  ⇒ open shadow: [ div#hidden, x-inner ⇒ open shadow: [ button#deep.act ] ]
    /// └─ x-vault  ⇒ closed shadow: [ div#sealed ]
    /// ```
    fn fixture() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let app = doc.create_element(None, ElementData::new("main").with_id("app"));

        let outer = doc.create_element(Some(app), ElementData::new("x-outer"));
        let outer_root = doc.attach_shadow(outer, ShadowMode::Open).unwrap();
        let hidden = doc.create_element(
            Some(outer_root),
            ElementData::new("div").with_id("hidden").with_class("act"),
        );
        let inner = doc.create_element(Some(outer_root), ElementData::new("x-inner"));
        let inner_root = doc.attach_shadow(inner, ShadowMode::Open).unwrap();
        let deep = doc.create_element(
            Some(inner_root),
            ElementData::new("button").with_id("deep").with_class("act"),
        );

        let vault = doc.create_element(Some(app), ElementData::new("x-vault"));
        let vault_root = doc.attach_shadow(vault, ShadowMode::Closed).unwrap();
        let _sealed = doc.create_element(Some(vault_root), ElementData::new("div").with_id("sealed"));

        (doc, hidden, deep, inner_root)
    }

    #[test]
    fn pierces_nested_open_shadow_trees() {
        let (doc, hidden, deep, inner_root) = fixture();

        let hit = find_by_id(&doc, "hidden", Scope::Document).unwrap();
        assert_eq!(hit.node, hidden);
        assert!(matches!(hit.scope, Scope::Shadow(_)));

        let hit = find_by_id(&doc, "deep", Scope::Document).unwrap();
        assert_eq!(hit.node, deep);
        assert_eq!(hit.scope, Scope::Shadow(inner_root));
    }

    #[test]
    fn closed_trees_stay_sealed() {
        let (doc, _, _, _) = fixture();
        assert_eq!(find_by_id(&doc, "sealed", Scope::Document), None);
    }

    #[test]
    fn pattern_search_collects_across_scopes_in_order() {
        let (doc, hidden, deep, _) = fixture();
        let sel = Selector::parse(".act").unwrap();
        let nodes: Vec<NodeId> = find_all_matching(&doc, &sel, Scope::Document)
            .into_iter()
            .map(|h| h.node)
            .collect();
        assert_eq!(nodes, vec![hidden, deep]);

        let first = first_match(&doc, &sel, Scope::Document).unwrap();
        assert_eq!(first.node, hidden);
    }

    #[test]
    fn search_scoped_below_the_document() {
        let (doc, _, deep, inner_root) = fixture();
        // Starting inside the inner shadow scope finds only its own content.
        let hit = find_by_id(&doc, "deep", Scope::Shadow(inner_root)).unwrap();
        assert_eq!(hit.node, deep);
        assert_eq!(find_by_id(&doc, "hidden", Scope::Shadow(inner_root)), None);
    }
}
