// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, shadow attachment, scoped queries.

use alloc::vec::Vec;

use crate::selector::Selector;
use crate::types::{ElementData, NodeId, Scope, ShadowMode};

/// Error returned by [`Document::attach_shadow`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AttachShadowError {
    /// The host id does not refer to a live node.
    #[error("shadow host is not a live node")]
    StaleHost,
    /// The host id refers to a shadow root, not an element.
    #[error("shadow host is not an element")]
    HostNotElement,
    /// The host already has a shadow tree; one per host, as on the platform.
    #[error("shadow host already has a shadow tree attached")]
    AlreadyAttached,
}

#[derive(Clone, Debug)]
enum NodeKind {
    Element {
        data: ElementData,
        shadow: Option<NodeId>,
    },
    ShadowRoot {
        mode: ShadowMode,
        host: NodeId,
    },
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena owning the main tree and every attached shadow tree.
///
/// Element nodes live in parent/child chains; each shadow root is a parentless
/// node linked to its host element, so plain child traversal never wanders
/// across a shadow boundary.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Insert a new element as a child of `parent`.
    ///
    /// `parent` may be another element or a shadow root; `None` creates a
    /// top-level element of the main tree.
    pub fn create_element(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let id = self.alloc(NodeKind::Element { data, shadow: None });
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Attach a shadow tree to `host` and return its shadow root.
    ///
    /// The returned id is the construction-time capability for populating the
    /// tree; for [`ShadowMode::Closed`] it is the only way to ever reach the
    /// tree again, since [`Self::open_shadow_root`] will not report it.
    pub fn attach_shadow(
        &mut self,
        host: NodeId,
        mode: ShadowMode,
    ) -> Result<NodeId, AttachShadowError> {
        if !self.is_alive(host) {
            return Err(AttachShadowError::StaleHost);
        }
        match &self.node(host).kind {
            NodeKind::ShadowRoot { .. } => return Err(AttachShadowError::HostNotElement),
            NodeKind::Element {
                shadow: Some(_), ..
            } => return Err(AttachShadowError::AlreadyAttached),
            NodeKind::Element { shadow: None, .. } => {}
        }
        let root = self.alloc(NodeKind::ShadowRoot { mode, host });
        if let NodeKind::Element { shadow, .. } = &mut self.node_mut(host).kind {
            *shadow = Some(root);
        }
        Ok(root)
    }

    /// Remove a node (and its subtree) from the document.
    ///
    /// Removing an element also removes its attached shadow tree; removing a
    /// shadow root detaches it from its host, leaving the host shadowless.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let NodeKind::ShadowRoot { host, .. } = self.node(id).kind {
            if let Some(h) = self.node_opt_mut(host)
                && let NodeKind::Element { shadow, .. } = &mut h.kind
            {
                *shadow = None;
            }
        }
        let shadow = match &self.node(id).kind {
            NodeKind::Element { shadow, .. } => *shadow,
            NodeKind::ShadowRoot { .. } => None,
        };
        if let Some(root) = shadow {
            self.remove(root);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Parent of `id`, if it is live and not a scope root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Children of `id`, in insertion (document) order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Element data of `id`. `None` for shadow roots and stale ids.
    pub fn data(&self, id: NodeId) -> Option<&ElementData> {
        if !self.is_alive(id) {
            return None;
        }
        match &self.node(id).kind {
            NodeKind::Element { data, .. } => Some(data),
            NodeKind::ShadowRoot { .. } => None,
        }
    }

    /// Mutable element data of `id`. `None` for shadow roots and stale ids.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        if !self.is_alive(id) {
            return None;
        }
        match &mut self.node_mut(id).kind {
            NodeKind::Element { data, .. } => Some(data),
            NodeKind::ShadowRoot { .. } => None,
        }
    }

    /// The shadow root attached to `host`, only when its mode is open.
    ///
    /// This is the script-visible accessor: closed trees return `None`, so
    /// nothing built on this call can observe their contents.
    pub fn open_shadow_root(&self, host: NodeId) -> Option<NodeId> {
        if !self.is_alive(host) {
            return None;
        }
        match &self.node(host).kind {
            NodeKind::Element {
                shadow: Some(root), ..
            } => match &self.node(*root).kind {
                NodeKind::ShadowRoot {
                    mode: ShadowMode::Open,
                    ..
                } => Some(*root),
                _ => None,
            },
            _ => None,
        }
    }

    /// The host element of a shadow root. `None` if `id` is not a live shadow root.
    pub fn host_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        match &self.node(id).kind {
            NodeKind::ShadowRoot { host, .. } => Some(*host),
            NodeKind::Element { .. } => None,
        }
    }

    /// The scope directly containing `id`.
    ///
    /// A shadow root is considered part of its own scope, matching the
    /// platform's `getRootNode` behavior. `None` for stale ids.
    pub fn scope_of(&self, id: NodeId) -> Option<Scope> {
        if !self.is_alive(id) {
            return None;
        }
        let mut cur = id;
        while let Some(p) = self.node(cur).parent {
            cur = p;
        }
        match &self.node(cur).kind {
            NodeKind::ShadowRoot { .. } => Some(Scope::Shadow(cur)),
            NodeKind::Element { .. } => Some(Scope::Document),
        }
    }

    /// First element in `scope` whose id attribute equals `id`, in document
    /// order. Does not look into shadow trees below `scope`.
    pub fn element_by_id(&self, scope: Scope, id: &str) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|&el| {
            self.data(el)
                .is_some_and(|d| d.id.as_deref() == Some(id))
        })
    }

    /// Every element of `scope` matching `selector`, in document order.
    /// Does not look into shadow trees below `scope`.
    pub fn query_all(&self, scope: Scope, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&el| self.matches(el, selector))
            .collect()
    }

    /// Every element of `scope` in document order (pre-order, children in
    /// insertion order). The enumeration stops at shadow boundaries.
    ///
    /// Top-level elements of the main tree enumerate in slot order; with
    /// removal and slot reuse this can differ from creation order.
    pub fn descendants(&self, scope: Scope) -> Vec<NodeId> {
        let mut out = Vec::new();
        match scope {
            Scope::Document => {
                let roots: Vec<NodeId> = self
                    .nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(i, n)| match n {
                        Some(n)
                            if n.parent.is_none()
                                && matches!(n.kind, NodeKind::Element { .. }) =>
                        {
                            #[allow(
                                clippy::cast_possible_truncation,
                                reason = "NodeId uses 32-bit indices by design."
                            )]
                            Some(NodeId::new(i as u32, n.generation))
                        }
                        _ => None,
                    })
                    .collect();
                for root in roots {
                    self.collect_subtree(root, &mut out);
                }
            }
            Scope::Shadow(root) => {
                if !self.is_alive(root)
                    || !matches!(self.node(root).kind, NodeKind::ShadowRoot { .. })
                {
                    return out;
                }
                for &child in &self.node(root).children {
                    self.collect_subtree(child, &mut out);
                }
            }
        }
        out
    }

    /// True if `id` is a live element matching `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.data(id).is_some_and(|d| selector.matches(d))
    }

    // --- internals ---

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.node(id).children {
            self.collect_subtree(child, out);
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn el(tag: &str) -> ElementData {
        ElementData::new(tag)
    }

    #[test]
    fn create_and_scoped_id_lookup() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main").with_id("app"));
        let child = doc.create_element(Some(root), el("div").with_id("inner"));

        assert_eq!(doc.element_by_id(Scope::Document, "app"), Some(root));
        assert_eq!(doc.element_by_id(Scope::Document, "inner"), Some(child));
        assert_eq!(doc.element_by_id(Scope::Document, "missing"), None);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main"));
        let a = doc.create_element(Some(root), el("div"));

        assert!(doc.is_alive(root));
        assert!(doc.is_alive(a));

        // Remove child; id becomes stale.
        doc.remove(a);
        assert!(!doc.is_alive(a));

        // Reuse slot by inserting a new node; old id must remain stale; new id is live.
        let b = doc.create_element(Some(root), el("span"));
        assert!(doc.is_alive(b));
        assert!(!doc.is_alive(a));
        // Sanity: either same slot or different, but if same slot, generation must be greater.
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn attach_shadow_once_per_host() {
        let mut doc = Document::new();
        let host = doc.create_element(None, el("x-panel"));
        let root = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        assert_eq!(
            doc.attach_shadow(host, ShadowMode::Open),
            Err(AttachShadowError::AlreadyAttached)
        );
        assert_eq!(
            doc.attach_shadow(root, ShadowMode::Open),
            Err(AttachShadowError::HostNotElement)
        );

        doc.remove(host);
        assert_eq!(
            doc.attach_shadow(host, ShadowMode::Open),
            Err(AttachShadowError::StaleHost)
        );
    }

    #[test]
    fn open_shadow_is_visible_closed_is_not() {
        let mut doc = Document::new();
        let open_host = doc.create_element(None, el("x-open"));
        let closed_host = doc.create_element(None, el("x-closed"));
        let open_root = doc.attach_shadow(open_host, ShadowMode::Open).unwrap();
        let closed_root = doc.attach_shadow(closed_host, ShadowMode::Closed).unwrap();

        assert_eq!(doc.open_shadow_root(open_host), Some(open_root));
        assert_eq!(doc.open_shadow_root(closed_host), None);

        // The closed tree still exists and is reachable through the
        // construction-time id, just not through the accessor.
        let secret = doc.create_element(Some(closed_root), el("div").with_id("secret"));
        assert_eq!(
            doc.element_by_id(Scope::Shadow(closed_root), "secret"),
            Some(secret)
        );
    }

    #[test]
    fn scoped_queries_do_not_cross_boundaries() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main"));
        let host = doc.create_element(Some(root), el("x-widget"));
        let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        let inner = doc.create_element(Some(shadow), el("div").with_id("inside"));

        assert_eq!(doc.element_by_id(Scope::Document, "inside"), None);
        assert_eq!(
            doc.element_by_id(Scope::Shadow(shadow), "inside"),
            Some(inner)
        );

        let all = doc.descendants(Scope::Document);
        assert_eq!(all, vec![root, host]);
        assert_eq!(doc.descendants(Scope::Shadow(shadow)), vec![inner]);
    }

    #[test]
    fn descendants_pre_order() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main"));
        let a = doc.create_element(Some(root), el("section"));
        let a1 = doc.create_element(Some(a), el("p"));
        let a2 = doc.create_element(Some(a), el("p"));
        let b = doc.create_element(Some(root), el("footer"));

        assert_eq!(doc.descendants(Scope::Document), vec![root, a, a1, a2, b]);
    }

    #[test]
    fn query_all_in_document_order() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main"));
        let first = doc.create_element(Some(root), el("p").with_class("note"));
        let _other = doc.create_element(Some(root), el("p"));
        let second = doc.create_element(Some(root), el("span").with_class("note"));

        let sel = Selector::parse(".note").unwrap();
        assert_eq!(doc.query_all(Scope::Document, &sel), vec![first, second]);
    }

    #[test]
    fn removing_host_removes_its_shadow_tree() {
        let mut doc = Document::new();
        let host = doc.create_element(None, el("x-panel"));
        let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        let inner = doc.create_element(Some(shadow), el("div"));

        doc.remove(host);
        assert!(!doc.is_alive(host));
        assert!(!doc.is_alive(shadow));
        assert!(!doc.is_alive(inner));
    }

    #[test]
    fn removing_shadow_root_detaches_host() {
        let mut doc = Document::new();
        let host = doc.create_element(None, el("x-panel"));
        let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();

        doc.remove(shadow);
        assert!(doc.is_alive(host));
        assert_eq!(doc.open_shadow_root(host), None);

        // The host is shadowless again and may attach a fresh tree.
        assert!(doc.attach_shadow(host, ShadowMode::Closed).is_ok());
    }

    #[test]
    fn scope_of_walks_to_the_containing_root() {
        let mut doc = Document::new();
        let root = doc.create_element(None, el("main"));
        let host = doc.create_element(Some(root), el("x-widget"));
        let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        let inner = doc.create_element(Some(shadow), el("div"));
        let deep = doc.create_element(Some(inner), el("span"));

        assert_eq!(doc.scope_of(root), Some(Scope::Document));
        assert_eq!(doc.scope_of(host), Some(Scope::Document));
        assert_eq!(doc.scope_of(shadow), Some(Scope::Shadow(shadow)));
        assert_eq!(doc.scope_of(deep), Some(Scope::Shadow(shadow)));
        assert_eq!(doc.host_of(shadow), Some(host));
        assert_eq!(doc.host_of(deep), None);
    }

    #[test]
    fn data_access_respects_liveness_and_kind() {
        let mut doc = Document::new();
        let host = doc.create_element(None, el("x-panel").with_id("p"));
        let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();

        assert_eq!(doc.data(host).map(|d| d.tag.as_str()), Some("x-panel"));
        assert!(doc.data(shadow).is_none(), "shadow roots carry no data");

        doc.data_mut(host).unwrap().classes.push("active".into());
        assert!(doc.data(host).unwrap().has_class("active"));

        doc.remove(host);
        assert!(doc.data(host).is_none(), "stale ids must return None");
    }
}
