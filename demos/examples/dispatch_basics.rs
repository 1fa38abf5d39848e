// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher basics.
//!
//! Registers a "counter" initializer, then runs one succeeding and one failing
//! request. Diagnostics go to stderr through the fmt subscriber; flip
//! `debug: true` off in the config to silence the informational lines.
//!
//! Run:
//! - `cargo run -p penumbra_demos --example dispatch_basics`

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use penumbra_dispatch::{init_fn, ComponentDispatcher, DispatcherConfig, InitRequest};
use penumbra_dom::{Document, ElementData, ShadowMode};
use tracing_subscriber::filter::LevelFilter;

/// The instance a counter initializer hands back to its caller.
#[derive(Debug)]
struct Counter {
    value: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let mut doc = Document::new();
    let app = doc.create_element(None, ElementData::new("main").with_id("app"));
    let host = doc.create_element(Some(app), ElementData::new("x-counter"));
    let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
    doc.create_element(
        Some(shadow),
        ElementData::new("output").with_id("count").with_class("display"),
    );

    let config = DispatcherConfig {
        debug: true,
        search_delay_ms: 25,
        ..DispatcherConfig::default()
    };
    let mut dispatcher = ComponentDispatcher::with_config(Rc::new(RefCell::new(doc)), config);
    dispatcher.register_component_type(
        "counter",
        init_fn(|doc, at, opts| {
            let start = opts
                .and_then(|o| o.downcast_ref::<u32>())
                .copied()
                .unwrap_or(0);
            // Initializers are the only dispatch-path code allowed to touch the tree.
            if let Some(data) = doc.data_mut(at.node) {
                data.classes.push("initialized".into());
            }
            Ok(Box::new(Counter { value: start }) as Box<dyn Any>)
        }),
    );

    let outcome = dispatcher
        .init_component(InitRequest {
            element_id: Some("count".into()),
            component_type: Some("counter".into()),
            options: Some(Box::new(5_u32)),
            ..InitRequest::default()
        })
        .await;
    match outcome {
        Ok(value) => match value.downcast::<Counter>() {
            Ok(counter) => println!("initialized: {counter:?}"),
            Err(_) => println!("initialized with an unexpected instance type"),
        },
        Err(err) => println!("failed: {err}"),
    }

    // A request for an element that never appears settles as a failure the
    // caller inspects; nothing panics and nothing else is disturbed.
    let outcome = dispatcher
        .init_component(InitRequest {
            element_id: Some("missing".into()),
            component_type: Some("counter".into()),
            ..InitRequest::default()
        })
        .await;
    match outcome {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("failed as expected: {err}"),
    }
}
