// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in initializers behind the registry.
//!
//! A convenience bundle (here: a minimal accordion) plugs in through
//! `FallbackInit`. The dispatcher consults it only after a registry miss, so
//! an application can always shadow a built-in by registering its own
//! initializer under the same name.
//!
//! Run:
//! - `cargo run -p penumbra_demos --example dispatch_fallback`

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use penumbra_dispatch::{init_fn, ComponentDispatcher, DispatcherConfig, FallbackInit, InitFn, InitRequest};
use penumbra_dom::{Document, ElementData, ShadowMode};

/// The bundle's built-ins, resolved by component type name.
struct Builtins;

impl FallbackInit for Builtins {
    fn resolve(&self, component_type: &str) -> Option<InitFn> {
        match component_type {
            "accordion" => Some(init_fn(|doc, at, _opts| {
                // Collapse every section of the accordion it finds.
                let sections: Vec<_> = doc.children(at.node).to_vec();
                for section in &sections {
                    if let Some(data) = doc.data_mut(*section) {
                        data.classes.push("collapsed".into());
                    }
                }
                Ok(Box::new(sections.len()) as Box<dyn Any>)
            })),
            _ => None,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut doc = Document::new();
    let app = doc.create_element(None, ElementData::new("main"));
    let host = doc.create_element(Some(app), ElementData::new("x-faq"));
    let shadow = doc.attach_shadow(host, ShadowMode::Open).unwrap();
    let list = doc.create_element(
        Some(shadow),
        ElementData::new("div").with_id("questions"),
    );
    for i in 0..3 {
        doc.create_element(
            Some(list),
            ElementData::new("section").with_id(format!("q{i}")),
        );
    }

    let config = DispatcherConfig {
        search_delay_ms: 10,
        ..DispatcherConfig::default()
    };
    let dispatcher =
        ComponentDispatcher::with_fallback(Rc::new(RefCell::new(doc)), config, Builtins);

    let outcome = dispatcher
        .init_component(InitRequest {
            element_id: Some("questions".into()),
            component_type: Some("accordion".into()),
            ..InitRequest::default()
        })
        .await
        .expect("accordion resolves through the fallback");
    println!(
        "accordion initialized with {} sections",
        outcome.downcast_ref::<usize>().unwrap()
    );

    // An unknown name misses both the registry and the bundle.
    let outcome = dispatcher
        .init_component(InitRequest {
            element_id: Some("questions".into()),
            component_type: Some("carousel".into()),
            ..InitRequest::default()
        })
        .await;
    match outcome {
        Ok(_) => println!("carousel: unexpected success"),
        Err(err) => println!("carousel: {err}"),
    }
}
