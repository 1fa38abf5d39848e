// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locator basics.
//!
//! Builds a document with two levels of open shadow trees plus one closed
//! pocket, then runs piercing searches from the document scope.
//!
//! Run:
//! - `cargo run -p penumbra_demos --example locator_basics`

use penumbra_dom::{Document, ElementData, Scope, Selector, ShadowMode};
use penumbra_locator::{find_all_matching, find_by_id, first_match};

fn main() {
    let mut doc = Document::new();
    let app = doc.create_element(None, ElementData::new("main").with_id("app"));

    // <x-card> with an open shadow tree hosting another component.
    let card = doc.create_element(Some(app), ElementData::new("x-card"));
    let card_root = doc.attach_shadow(card, ShadowMode::Open).unwrap();
    doc.create_element(
        Some(card_root),
        ElementData::new("header").with_class("title"),
    );
    let toggle = doc.create_element(Some(card_root), ElementData::new("x-toggle"));
    let toggle_root = doc.attach_shadow(toggle, ShadowMode::Open).unwrap();
    doc.create_element(
        Some(toggle_root),
        ElementData::new("button").with_id("switch").with_class("title"),
    );

    // A closed tree: reachable only through the id returned at attach time.
    let vault = doc.create_element(Some(app), ElementData::new("x-vault"));
    let vault_root = doc.attach_shadow(vault, ShadowMode::Closed).unwrap();
    doc.create_element(Some(vault_root), ElementData::new("div").with_id("sealed"));

    println!("== find_by_id across open boundaries ==");
    for id in ["app", "switch", "sealed", "missing"] {
        match find_by_id(&doc, id, Scope::Document) {
            Some(hit) => println!("  #{id}: found {:?} in {:?}", hit.node, hit.scope),
            None => println!("  #{id}: not reachable"),
        }
    }

    let sel = Selector::parse(".title").unwrap();
    println!("== find_all_matching(.title) in traversal order ==");
    for hit in find_all_matching(&doc, &sel, Scope::Document) {
        let tag = doc.data(hit.node).map(|d| d.tag.clone()).unwrap_or_default();
        println!("  <{tag}> {:?} in {:?}", hit.node, hit.scope);
    }

    let first = first_match(&doc, &sel, Scope::Document).unwrap();
    println!("first match: {:?}", first.node);
}
