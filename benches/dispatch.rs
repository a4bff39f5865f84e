//! Benchmarks for hierarchy queries.
//!
//! Tests query performance over two synthetic program shapes:
//! - A deep inheritance chain (long ancestor walks)
//! - A wide tree (large subclass closures and implementor scans)

extern crate chascope;

use chascope::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use std::hint::black_box;

const CHAIN_DEPTH: usize = 512;
const TREE_FANOUT: usize = 8;
const TREE_DEPTH: u32 = 4;

fn tick() -> MethodRef {
    MethodRef::new("tick", Type::new("V"), vec![Type::new("J")])
}

fn tick_on(ty: &Type) -> Method {
    Method::new(ty.clone(), "tick", Type::new("V"), vec![Type::new("J")])
}

/// `LNode0;` defines `tick`, every later node only extends the previous one.
fn deep_chain() -> (Program, Type) {
    let node = |i: usize| Type::new(&format!("LNode{i};"));

    let program: Program = (0..CHAIN_DEPTH)
        .map(|i| {
            let class = Class::new(node(i), i.checked_sub(1).map(node));
            if i == 0 {
                class.with_method(tick_on(&node(0)))
            } else {
                class
            }
        })
        .collect();

    (program, node(CHAIN_DEPTH - 1))
}

/// A complete tree under `LRoot;`, every other class overriding `tick` and implementing
/// `LClock;`.
fn wide_tree() -> (Program, Type) {
    let root = Type::new("LRoot;");
    let clock = Type::new("LClock;");
    let mut classes = vec![Class::new(root.clone(), None).with_method(tick_on(&root))];
    let mut frontier = vec![root.clone()];
    let mut next_id = 0usize;

    for _ in 0..TREE_DEPTH {
        let mut next = Vec::with_capacity(frontier.len() * TREE_FANOUT);
        for parent in &frontier {
            for _ in 0..TREE_FANOUT {
                let ty = Type::new(&format!("LLeaf{next_id};"));
                let mut class = Class::new(ty.clone(), Some(parent.clone()));
                if next_id % 2 == 0 {
                    class = class.implements(clock.clone()).with_method(tick_on(&ty));
                }
                next_id += 1;
                classes.push(class);
                next.push(ty);
            }
        }
        frontier = next;
    }

    (classes.into_iter().collect(), root)
}

/// Benchmark resolving at the bottom of a deep chain, cold and warm.
fn bench_resolve_deep_chain(c: &mut Criterion) {
    let (program, bottom) = deep_chain();

    let mut group = c.benchmark_group("resolve_deep_chain");
    group.throughput(Throughput::Elements(CHAIN_DEPTH as u64));
    group.bench_function("uncached", |b| {
        let index = HierarchyIndex::with_config(&program, ChaConfig::uncached());
        b.iter(|| black_box(index.resolve_method_ref(black_box(&bottom), &tick())));
    });
    group.bench_function("cold_cache", |b| {
        b.iter_batched(
            || HierarchyIndex::new(&program),
            |index| black_box(index.resolve_method_ref(black_box(&bottom), &tick())),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("warm_cache", |b| {
        let index = HierarchyIndex::new(&program);
        let _ = index.resolve_method_ref(&bottom, &tick());
        b.iter(|| black_box(index.resolve_method_ref(black_box(&bottom), &tick())));
    });
    group.finish();
}

/// Benchmark building the index over the wide tree.
fn bench_build_index(c: &mut Criterion) {
    let (program, _) = wide_tree();

    let mut group = c.benchmark_group("build_index");
    group.throughput(Throughput::Elements(program.len() as u64));
    group.bench_function("wide_tree", |b| {
        b.iter(|| black_box(HierarchyIndex::new(black_box(&program))));
    });
    group.finish();
}

/// Benchmark over-approximated dispatch from the root of the wide tree.
fn bench_any_target_wide_tree(c: &mut Criterion) {
    let (program, root) = wide_tree();
    let index = HierarchyIndex::new(&program);

    c.bench_function("any_target_wide_tree", |b| {
        b.iter(|| black_box(index.any_target(InvokeKind::Virtual, &tick(), black_box(&root))));
    });
}

/// Benchmark the whole-program implementor search.
fn bench_implementations_of(c: &mut Criterion) {
    let (program, _) = wide_tree();
    let index = HierarchyIndex::new(&program);

    c.bench_function("implementations_of_wide_tree", |b| {
        b.iter(|| black_box(index.implementations_of(black_box("LClock;"), &tick())));
    });
}

criterion_group!(
    benches,
    bench_resolve_deep_chain,
    bench_build_index,
    bench_any_target_wide_tree,
    bench_implementations_of
);
criterion_main!(benches);
