// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher implementation.
//!
//! ## Overview
//!
//! One [`ComponentDispatcher::init_component`] call runs one request through a
//! fixed sequence: validate → wait → locate → resolve initializer → invoke.
//! Every path ends in exactly one settled outcome; no step is skipped, and a
//! failure at any step converts to the returned error rather than escaping.
//!
//! ## Target and handler selection
//!
//! A request names its target by element id or selector and its handler by
//! component type or custom function. Each pair is mutually exclusive in
//! intent, but when both halves are supplied the request does not fail:
//! `element_id` silently outranks `selector`, and `custom_init` outranks
//! `component_type`. The precedence is unannounced to keep compatibility with
//! callers that rely on it; it can surprise, so both winners are logged at
//! debug level.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use penumbra_dom::{Document, Scope, Selector};
use penumbra_locator::{find_all_matching, find_by_id};
use tracing::{debug, error, warn};

use crate::config::DispatcherConfig;
use crate::error::{DispatchError, SearchTarget};
use crate::registry::{FallbackInit, InitFn, InitRegistry, InitValue, NoFallback};

/// One dispatch attempt: a target selection, a handler selection, opaque
/// options for the handler, and an optional delay override.
///
/// Requests are ephemeral; construct one per attempt with struct-update
/// syntax over [`Default`]:
///
/// ```
/// use penumbra_dispatch::InitRequest;
///
/// let request = InitRequest {
///     element_id: Some("count".into()),
///     component_type: Some("counter".into()),
///     ..InitRequest::default()
/// };
/// ```
#[derive(Default)]
pub struct InitRequest {
    /// Locate the target by element identifier. Outranks [`Self::selector`]
    /// when both are given.
    pub element_id: Option<String>,
    /// Locate the target by selector; the first match in traversal order is
    /// used and the rest are discarded.
    pub selector: Option<String>,
    /// Resolve the initializer by registered name (registry first, then the
    /// dispatcher's fallback provider).
    pub component_type: Option<String>,
    /// Use this initializer directly. Outranks [`Self::component_type`] when
    /// both are given.
    pub custom_init: Option<InitFn>,
    /// Opaque payload handed to the initializer unchanged.
    pub options: Option<Box<dyn Any>>,
    /// Settling delay for this request, overriding
    /// [`DispatcherConfig::search_delay_ms`].
    pub delay: Option<Duration>,
}

impl core::fmt::Debug for InitRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitRequest")
            .field("element_id", &self.element_id)
            .field("selector", &self.selector)
            .field("component_type", &self.component_type)
            .field("custom_init", &self.custom_init.is_some())
            .field("options", &self.options.is_some())
            .field("delay", &self.delay)
            .finish()
    }
}

/// Delayed locate-then-initialize dispatch over one document.
///
/// ## Usage
///
/// - Construct with [`ComponentDispatcher::new`] or
///   [`ComponentDispatcher::with_config`]; use
///   [`ComponentDispatcher::with_fallback`] to add built-in initializers
///   behind the registry.
/// - Register named initializers with
///   [`ComponentDispatcher::register_component_type`]; re-registration
///   replaces.
/// - Call [`ComponentDispatcher::init_component`] per request and await the
///   settled outcome.
///
/// ## Concurrency
///
/// Everything is single-threaded and cooperative. A request suspends exactly
/// once, for its settling delay, before touching the tree; outstanding
/// requests interleave at that point and settle in no guaranteed order, each
/// with its own outcome. The registry is read at dispatch time, so a
/// registration between issuing and settling is observed by the settle.
pub struct ComponentDispatcher<F = NoFallback> {
    document: Rc<RefCell<Document>>,
    registry: InitRegistry,
    config: DispatcherConfig,
    fallback: F,
}

impl<F: core::fmt::Debug> core::fmt::Debug for ComponentDispatcher<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ComponentDispatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl ComponentDispatcher<NoFallback> {
    /// Create a dispatcher with default configuration and no fallback
    /// initializers.
    pub fn new(document: Rc<RefCell<Document>>) -> Self {
        Self::with_config(document, DispatcherConfig::default())
    }

    /// Create a dispatcher with the given configuration and no fallback
    /// initializers.
    pub fn with_config(document: Rc<RefCell<Document>>, config: DispatcherConfig) -> Self {
        Self::with_fallback(document, config, NoFallback)
    }
}

impl<F: FallbackInit> ComponentDispatcher<F> {
    /// Create a dispatcher that consults `fallback` for component types the
    /// registry does not know.
    pub fn with_fallback(
        document: Rc<RefCell<Document>>,
        config: DispatcherConfig,
        fallback: F,
    ) -> Self {
        Self {
            document,
            registry: InitRegistry::new(),
            config,
            fallback,
        }
    }

    /// The dispatcher's configuration.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The document this dispatcher searches and hands to initializers.
    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    /// The named-initializer registry.
    pub fn registry(&self) -> &InitRegistry {
        &self.registry
    }

    /// Register `init` under `name`; a later registration for the same name
    /// replaces it.
    pub fn register_component_type(&mut self, name: impl Into<String>, init: InitFn) {
        self.registry.register(name, init);
    }

    /// Run one initialization request to its settled outcome.
    ///
    /// The request moves through validate → wait → locate → resolve → invoke:
    ///
    /// 1. Requests with no target or no handler settle immediately as
    ///    configuration failures, before any suspension.
    /// 2. The request suspends once, for its delay (default
    ///    [`DispatcherConfig::search_delay_ms`]), giving the host time to
    ///    finish attaching shadow trees. A coarse fixed wait, not a poll.
    /// 3. The target is located from the document scope, piercing open shadow
    ///    boundaries; a selector takes its first match in traversal order.
    ///    Nothing found settles as [`DispatchError::NotFound`] naming the key.
    /// 4. The initializer resolves: custom function, else registry, else the
    ///    fallback provider, else
    ///    [`DispatchError::UnknownComponentType`].
    /// 5. The initializer runs with the document, the located element, and
    ///    the request's options. Its return value settles the request; its
    ///    error settles the request as [`DispatchError::HandlerFailed`],
    ///    never an unhandled fault.
    ///
    /// Dropping the returned future before completion abandons the request.
    pub async fn init_component(&self, request: InitRequest) -> Result<InitValue, DispatchError> {
        let InitRequest {
            element_id,
            selector,
            component_type,
            custom_init,
            options,
            delay,
        } = request;

        let target = match (element_id, selector) {
            (Some(id), Some(_)) => {
                if self.config.debug {
                    debug!(id = %id, "element id outranks the supplied selector");
                }
                SearchTarget::Id(id)
            }
            (Some(id), None) => SearchTarget::Id(id),
            (None, Some(text)) => SearchTarget::Selector(text),
            (None, None) => {
                error!("initialization request supplies no target");
                return Err(DispatchError::MissingTarget);
            }
        };

        enum Handler {
            Custom(InitFn),
            Named(String),
        }
        let handler = match (custom_init, component_type) {
            (Some(init), named) => {
                if self.config.debug && named.is_some() {
                    debug!(%target, "custom initializer outranks the component type");
                }
                Handler::Custom(init)
            }
            (None, Some(name)) => Handler::Named(name),
            (None, None) => {
                error!(%target, "initialization request supplies no handler");
                return Err(DispatchError::MissingHandler);
            }
        };

        let delay = delay.unwrap_or_else(|| self.config.search_delay());
        if self.config.debug {
            debug!(%target, ?delay, "waiting before element search");
        }
        tokio::time::sleep(delay).await;

        let located = match &target {
            SearchTarget::Id(id) => {
                let doc = self.document.borrow();
                find_by_id(&*doc, id, Scope::Document)
            }
            SearchTarget::Selector(text) => {
                let selector = Selector::parse(text).map_err(|source| {
                    error!(selector = %text, %source, "selector failed to parse");
                    DispatchError::InvalidSelector {
                        selector: text.clone(),
                        source,
                    }
                })?;
                let doc = self.document.borrow();
                let mut matches = find_all_matching(&*doc, &selector, Scope::Document);
                if matches.len() > 1 && self.config.debug {
                    debug!(
                        %target,
                        discarded = matches.len() - 1,
                        "selector matched multiple elements; using the first"
                    );
                }
                (!matches.is_empty()).then(|| matches.remove(0))
            }
        };
        let Some(located) = located else {
            warn!(%target, "no element found");
            return Err(DispatchError::NotFound(target));
        };

        let init = match handler {
            Handler::Custom(init) => init,
            Handler::Named(name) => {
                let resolved = self
                    .registry
                    .resolve(&name)
                    .or_else(|| self.fallback.resolve(&name));
                match resolved {
                    Some(init) => init,
                    None => {
                        warn!(component_type = %name, "no initializer registered or built in");
                        return Err(DispatchError::UnknownComponentType(name));
                    }
                }
            }
        };

        if self.config.debug {
            debug!(%target, node = ?located.node, "invoking initializer");
        }
        let outcome = {
            let mut doc = self.document.borrow_mut();
            init(&mut doc, located, options.as_deref())
        };
        match outcome {
            Ok(value) => {
                if self.config.debug {
                    debug!(%target, "component initialized");
                }
                Ok(value)
            }
            Err(reason) => {
                error!(%target, %reason, "initializer failed");
                Err(DispatchError::HandlerFailed { target, reason })
            }
        }
    }
}
