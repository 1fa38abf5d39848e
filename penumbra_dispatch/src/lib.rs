// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Penumbra Dispatch: delayed component initialization over shadow-piercing search.
//!
//! ## Overview
//!
//! A [`ComponentDispatcher`] wires JavaScript-style "find the element, then run
//! its initializer" flows over a [`penumbra_dom::Document`]. Each
//! [`InitRequest`] names a target (an element id, or a selector whose first
//! match is taken) and a handler (a registered component type name, or a
//! custom function), waits a configurable settling delay so the host can
//! finish attaching shadow trees, locates the target across every open shadow
//! boundary, and invokes exactly one initializer with the element, its
//! containing scope, and the request's opaque options.
//!
//! ## Settling
//!
//! [`ComponentDispatcher::init_component`] resolves exactly once: the
//! initializer's return value on success, a [`DispatchError`] otherwise. A
//! failure inside one request never escapes as a fault and never affects other
//! in-flight requests; callers inspect the returned `Result`. Distinct
//! requests settle in no guaranteed order. There is no cancellation: dropping
//! the future before it completes simply abandons the request.
//!
//! ## Handlers
//!
//! Initializers are plain functions of three values (the document, the
//! [`Located`](penumbra_locator::Located) element with its scope, and an
//! optional `dyn Any` options payload), registered by name in an
//! [`InitRegistry`] (last registration wins) or passed per request. When a
//! name misses the registry, a [`FallbackInit`] provider is consulted before
//! the request settles as unknown.
//!
//! ## Diagnostics
//!
//! Branch points emit `tracing` events: informational steps at debug level
//! only when [`DispatcherConfig::debug`] is set, misses as warnings, faults as
//! errors. Where the events go is the subscriber's decision.
//!
//! ### Minimal usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use penumbra_dispatch::{init_fn, ComponentDispatcher, DispatcherConfig, InitRequest};
//! use penumbra_dom::{Document, ElementData, ShadowMode};
//!
//! let mut doc = Document::new();
//! let host = doc.create_element(None, ElementData::new("x-counter"));
//! let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
//! doc.create_element(Some(shadow), ElementData::new("output").with_id("count"));
//!
//! let config = DispatcherConfig {
//!     search_delay_ms: 0,
//!     ..DispatcherConfig::default()
//! };
//! let mut dispatcher = ComponentDispatcher::with_config(Rc::new(RefCell::new(doc)), config);
//! dispatcher.register_component_type(
//!     "counter",
//!     init_fn(|doc, at, _opts| {
//!         let tag = doc.data(at.node).map(|d| d.tag.clone()).unwrap_or_default();
//!         Ok(Box::new(tag) as Box<dyn std::any::Any>)
//!     }),
//! );
//!
//! let outcome = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap()
//!     .block_on(dispatcher.init_component(InitRequest {
//!         element_id: Some("count".into()),
//!         component_type: Some("counter".into()),
//!         ..InitRequest::default()
//!     }))
//!     .unwrap();
//! assert_eq!(outcome.downcast_ref::<String>().map(String::as_str), Some("output"));
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;

pub use config::DispatcherConfig;
pub use dispatcher::{ComponentDispatcher, InitRequest};
pub use error::{DispatchError, SearchTarget};
pub use registry::{init_fn, FallbackInit, InitError, InitFn, InitRegistry, InitValue, NoFallback};
