//! Benchmarks for graph construction and the cycle pass
//!
//! Builds flat `node_modules` installations of increasing size on disk and
//! measures a full traversal, then measures the peel on synthetic graphs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depscope::analyze::{analyze, AnalyzeOptions};
use depscope::graph::{peel, strongly_connected_edges, DependencyGraph, PackageNode};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, name: &str, deps: &[String]) {
    fs::create_dir_all(dir).unwrap();
    let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|d| (d.clone(), serde_json::Value::from("^1.0.0")))
        .collect();
    let manifest = serde_json::json!({
        "name": name,
        "version": "1.0.0",
        "dependencies": deps,
    });
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
}

/// Create a flat installation where package i depends on its
/// `children_per_node` successors in a k-ary tree, with every tenth package
/// also depending back on the first one.
fn create_installation(total_packages: usize, children_per_node: usize) -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let name = |i: usize| format!("dep-{}", i);

    let children = |i: usize| -> Vec<String> {
        let mut deps: Vec<String> = (1..=children_per_node)
            .map(|c| i * children_per_node + c)
            .filter(|&c| c < total_packages)
            .map(name)
            .collect();
        if i % 10 == 9 {
            deps.push(name(0));
        }
        deps
    };

    write_manifest(tmp.path(), "root", &[name(0)]);
    for i in 0..total_packages {
        write_manifest(&tmp.path().join("node_modules").join(name(i)), &name(i), &children(i));
    }

    tmp
}

/// Create an in-memory graph with the same shape as `create_installation`.
fn create_graph(total_nodes: usize, children_per_node: usize) -> DependencyGraph {
    let id = |i: usize| format!("dep-{}@1.0.0", i);
    let mut graph = DependencyGraph::new();
    for i in 0..total_nodes {
        let name = format!("dep-{}", i);
        graph.add_node(PackageNode::new(name.clone(), "1.0.0", None, name));
    }
    for i in 0..total_nodes {
        for c in 1..=children_per_node {
            let child = i * children_per_node + c;
            if child < total_nodes {
                graph.add_edge(&id(i), &id(child));
            }
        }
        if i % 10 == 9 {
            graph.add_edge(&id(i), &id(0));
        }
    }
    graph
}

/// Benchmark a full traversal of an installation tree
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);

    for size in [100, 500, 1000].iter() {
        let installation = create_installation(*size, 5);
        let options = AnalyzeOptions::default().with_depth(64);

        group.bench_with_input(BenchmarkId::new("packages", size), size, |b, _| {
            b.iter(|| black_box(analyze(installation.path(), &options)));
        });
    }

    group.finish();
}

/// Benchmark the double peel against exact SCC detection
fn bench_cycle_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_pass");

    for size in [1000, 5000, 10000].iter() {
        let graph = create_graph(*size, 5);

        group.bench_with_input(BenchmarkId::new("peel", size), size, |b, _| {
            b.iter(|| black_box(peel(&graph)));
        });
        group.bench_with_input(BenchmarkId::new("scc", size), size, |b, _| {
            b.iter(|| black_box(strongly_connected_edges(&graph)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_cycle_pass);
criterion_main!(benches);
