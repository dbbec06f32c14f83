use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::path::Path;

use nestmap::{score_if, Checker, ScoreOptions};

/// A single if expression nested `depth` levels deep.
fn tower_expr(depth: usize) -> syn::ExprIf {
    let mut text = String::new();
    for level in 0..depth {
        text.push_str(&format!("if flags[{level}] {{\n"));
    }
    for _ in 0..depth {
        text.push('}');
    }
    let expr: syn::Expr = syn::parse_str(&text).unwrap();
    match expr {
        syn::Expr::If(expr) => expr,
        _ => unreachable!("tower source always parses to an if"),
    }
}

/// A flat else-if ladder with `branches` arms.
fn chain_expr(branches: usize) -> syn::ExprIf {
    let mut text = String::from("if flags[0] {\n}");
    for branch in 1..branches {
        text.push_str(&format!(" else if flags[{branch}] {{\n}}"));
    }
    let expr: syn::Expr = syn::parse_str(&text).unwrap();
    match expr {
        syn::Expr::If(expr) => expr,
        _ => unreachable!("chain source always parses to an if"),
    }
}

/// A file of `functions` small functions, each with a moderately nested if.
fn codebase(functions: usize) -> String {
    let mut source = String::new();
    for index in 0..functions {
        source.push_str(&format!(
            "fn f{index}(a: bool, b: bool, c: bool) {{\n    \
             if a {{\n        \
             if b {{\n            \
             if c {{}}\n        \
             }} else {{\n            \
             if c {{}}\n        \
             }}\n    \
             }}\n}}\n\n"
        ));
    }
    source
}

fn bench_score_if(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_if");
    let options = ScoreOptions::default();

    for depth in [4, 8, 16] {
        let expr = tower_expr(depth);
        group.bench_with_input(BenchmarkId::new("tower", depth), &expr, |b, expr| {
            b.iter(|| score_if(black_box(expr), &options));
        });
    }

    for branches in [8, 32] {
        let expr = chain_expr(branches);
        group.bench_with_input(BenchmarkId::new("chain", branches), &expr, |b, expr| {
            b.iter(|| score_if(black_box(expr), &options));
        });
    }

    group.finish();
}

fn bench_check_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_source");

    for functions in [10, 100] {
        let source = codebase(functions);
        group.bench_with_input(
            BenchmarkId::new("functions", functions),
            &source,
            |b, source| {
                b.iter(|| {
                    let mut checker = Checker::new();
                    checker
                        .check_source(Path::new("bench.rs"), black_box(source))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_if, bench_check_source);
criterion_main!(benches);
