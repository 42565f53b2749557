//! Optimizer benchmarks over random formulas.
//!
//! Run with:
//! ```bash
//! cargo bench --bench optimize
//! ```

use boolopt::ast::Ast;
use boolopt::optimizer::Optimizer;
use boolopt::reference::NodeId;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const VARIABLES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

/// Build a random formula of the given depth.
fn random_node(ast: &mut Ast, rng: &mut ChaCha8Rng, depth: usize) -> NodeId {
    if depth == 0 || rng.random_bool(0.1) {
        return if rng.random_bool(0.9) {
            ast.mk_id(*VARIABLES.choose(rng).unwrap())
        } else {
            ast.mk_literal(rng.random_bool(0.5))
        };
    }
    match rng.random_range(0..8) {
        0..=2 => {
            let left = random_node(ast, rng, depth - 1);
            let right = random_node(ast, rng, depth - 1);
            ast.mk_and(left, right)
        }
        3..=5 => {
            let left = random_node(ast, rng, depth - 1);
            let right = random_node(ast, rng, depth - 1);
            ast.mk_or(left, right)
        }
        6 => {
            let child = random_node(ast, rng, depth - 1);
            ast.mk_not(child)
        }
        _ => {
            let child = random_node(ast, rng, depth - 1);
            ast.mk_parens(child)
        }
    }
}

fn random_tree(seed: u64, depth: usize) -> (Ast, NodeId) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ast = Ast::new();
    let node = random_node(&mut ast, &mut rng, depth);
    let root = ast.mk_root(node);
    (ast, root)
}

/// Left-deep OR chain over repeating variables, the worst case for chain reduction.
fn long_chain(len: usize) -> (Ast, NodeId) {
    let mut ast = Ast::new();
    let mut acc = ast.mk_id(VARIABLES[0]);
    for i in 1..len {
        let id = ast.mk_id(VARIABLES[i % VARIABLES.len()]);
        acc = ast.mk_or(acc, id);
    }
    let root = ast.mk_root(acc);
    (ast, root)
}

fn bench_random_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize/random_formula");
    let optimizer = Optimizer::default();

    for depth in [6, 9, 12] {
        let (ast, root) = random_tree(42, depth);
        group.throughput(Throughput::Elements(ast.size(root) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter_batched(
                || ast.clone(),
                |mut ast| {
                    optimizer.optimize(&mut ast, root);
                    ast
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_long_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize/long_chain");
    let optimizer = Optimizer::default();

    for len in [16, 64, 256, 2000] {
        let (ast, root) = long_chain(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter_batched(
                || ast.clone(),
                |mut ast| {
                    optimizer.optimize(&mut ast, root);
                    ast
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let (ast, root) = random_tree(7, 10);
    let text = ast.display(root).to_string();
    c.bench_function("parse/random_formula", |b| {
        b.iter(|| Ast::parse(std::hint::black_box(&text)).unwrap());
    });
}

criterion_group!(benches, bench_random_formula, bench_long_chain, bench_parse);
criterion_main!(benches);
