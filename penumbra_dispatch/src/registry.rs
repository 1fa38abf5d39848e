// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named initializer storage and the fallback seam.

use std::any::Any;
use std::rc::Rc;

use penumbra_dom::{Document, NodeId, Scope};
use penumbra_locator::Located;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Opaque value an initializer produces; becomes the settled success outcome.
pub type InitValue = Box<dyn Any>;

/// Error an initializer fails with; becomes the settled failure reason.
pub type InitError = Box<dyn std::error::Error>;

/// An initializer: exactly three inputs, the document, the located element
/// with its containing scope, and the request's opaque options.
///
/// Initializers are the only code on the dispatch path allowed to mutate the
/// document.
pub type InitFn =
    Rc<dyn Fn(&mut Document, Located<NodeId, Scope>, Option<&dyn Any>) -> Result<InitValue, InitError>>;

/// Wrap a closure as an [`InitFn`].
pub fn init_fn<F>(f: F) -> InitFn
where
    F: Fn(&mut Document, Located<NodeId, Scope>, Option<&dyn Any>) -> Result<InitValue, InitError>
        + 'static,
{
    Rc::new(f)
}

/// Name-to-initializer registry.
///
/// Entries are only ever added; registering under an existing name replaces
/// the previous entry (last write wins, no duplicate-key error). Lookup misses
/// are a valid outcome, handled by the caller.
#[derive(Default)]
pub struct InitRegistry {
    entries: FxHashMap<String, InitFn>,
}

impl core::fmt::Debug for InitRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("InitRegistry")
            .field("entries", &names)
            .finish_non_exhaustive()
    }
}

impl InitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `init` under `name`, replacing any prior entry for that name.
    pub fn register(&mut self, name: impl Into<String>, init: InitFn) {
        let name = name.into();
        if self.entries.insert(name.clone(), init).is_some() {
            debug!(component_type = %name, "replacing registered initializer");
        }
    }

    /// Look up an initializer by name. Absence is not an error.
    pub fn resolve(&self, name: &str) -> Option<InitFn> {
        self.entries.get(name).cloned()
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in initializers consulted when the registry misses a component type.
///
/// This is the seam convenience bundles (an accordion helper, say) plug into:
/// given a component type name, return an initializer or nothing. The
/// dispatcher tries the registry first and this provider second.
pub trait FallbackInit {
    /// Resolve a built-in initializer for `component_type`, if this provider
    /// knows the name.
    fn resolve(&self, component_type: &str) -> Option<InitFn>;
}

/// The default provider: resolves nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoFallback;

impl FallbackInit for NoFallback {
    #[inline]
    fn resolve(&self, _component_type: &str) -> Option<InitFn> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagging(tag: &'static str) -> InitFn {
        init_fn(move |_, _, _| Ok(Box::new(tag) as InitValue))
    }

    fn run(init: &InitFn) -> &'static str {
        let mut doc = Document::new();
        let el = doc.create_element(None, penumbra_dom::ElementData::new("div"));
        let located = Located {
            node: el,
            scope: Scope::Document,
        };
        init(&mut doc, located, None)
            .unwrap()
            .downcast_ref::<&'static str>()
            .copied()
            .expect("static str payload")
    }

    #[test]
    fn resolve_misses_are_none() {
        let registry = InitRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("anything").is_none());
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = InitRegistry::new();
        registry.register("counter", tagging("counter"));
        assert!(registry.contains("counter"));
        assert_eq!(registry.len(), 1);
        let init = registry.resolve("counter").unwrap();
        assert_eq!(run(&init), "counter");
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = InitRegistry::new();
        registry.register("counter", tagging("first"));
        registry.register("counter", tagging("second"));
        assert_eq!(registry.len(), 1, "replacement, not accumulation");
        let init = registry.resolve("counter").unwrap();
        assert_eq!(run(&init), "second");
    }

    #[test]
    fn no_fallback_resolves_nothing() {
        assert!(NoFallback.resolve("accordion").is_none());
    }
}
