// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use penumbra_dom::{Document, ElementData, NodeId, Scope, Selector, ShadowMode};
use penumbra_locator::{find_all_matching, find_by_id};

/// Chain of `depth` open shadow trees, each scope holding `width` plain
/// elements plus the next host. The target id sits at the bottom.
fn deep_chain(depth: usize, width: usize) -> Document {
    let mut doc = Document::new();
    let mut parent: Option<NodeId> = None;
    for level in 0..depth {
        let host = doc.create_element(parent, ElementData::new("x-level"));
        let root = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        for i in 0..width {
            doc.create_element(
                Some(root),
                ElementData::new("div").with_class(format!("w{i}")),
            );
        }
        if level == depth - 1 {
            doc.create_element(
                Some(root),
                ElementData::new("span").with_id("needle").with_class("mark"),
            );
        }
        let next = doc.create_element(Some(root), ElementData::new("x-next"));
        parent = Some(next);
    }
    doc
}

/// One scope with `hosts` sibling shadow trees of `width` elements each.
fn wide_forest(hosts: usize, width: usize) -> Document {
    let mut doc = Document::new();
    let app = doc.create_element(None, ElementData::new("main"));
    for h in 0..hosts {
        let host = doc.create_element(Some(app), ElementData::new("x-host"));
        let root = doc.attach_shadow(host, ShadowMode::Open).unwrap();
        for _ in 0..width {
            doc.create_element(Some(root), ElementData::new("p").with_class("row"));
        }
        if h == hosts - 1 {
            doc.create_element(Some(root), ElementData::new("span").with_id("needle"));
        }
    }
    doc
}

fn bench_find_by_id(c: &mut Criterion) {
    let deep = deep_chain(16, 8);
    c.bench_function("find_by_id deep hit", |b| {
        b.iter(|| find_by_id(&deep, black_box("needle"), Scope::Document))
    });
    c.bench_function("find_by_id deep miss", |b| {
        b.iter(|| find_by_id(&deep, black_box("absent"), Scope::Document))
    });

    let wide = wide_forest(64, 16);
    c.bench_function("find_by_id wide hit", |b| {
        b.iter(|| find_by_id(&wide, black_box("needle"), Scope::Document))
    });
}

fn bench_find_all(c: &mut Criterion) {
    let deep = deep_chain(16, 8);
    let mark = Selector::parse(".mark").unwrap();
    c.bench_function("find_all_matching deep", |b| {
        b.iter(|| find_all_matching(&deep, black_box(&mark), Scope::Document))
    });

    let wide = wide_forest(64, 16);
    let rows = Selector::parse("p.row").unwrap();
    c.bench_function("find_all_matching wide", |b| {
        b.iter(|| find_all_matching(&wide, black_box(&rows), Scope::Document))
    });
}

criterion_group!(benches, bench_find_by_id, bench_find_all);
criterion_main!(benches);
