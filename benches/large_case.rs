// SPDX-License-Identifier: MPL-2.0

//! A synthetic version-selection instance sized to exercise restart
//! branch-and-bound over a nontrivial search tree. Not meant to be
//! representative of any real package graph, only to catch regressions in
//! propagation/search cost.

use criterion::{criterion_group, criterion_main, Criterion};

use dep_select::VersionProblem;

/// Builds a chain of `depth` packages, each depending on the next within a
/// narrow version window, plus a handful of extra unconstrained packages to
/// widen the branching search.
fn build_large_problem() -> VersionProblem {
    const CHAIN_DEPTH: usize = 12;
    const VERSIONS_PER_PACKAGE: i32 = 6;
    const EXTRA_PACKAGES: usize = 8;

    let mut problem = VersionProblem::new(CHAIN_DEPTH + EXTRA_PACKAGES);
    let chain: Vec<_> = (0..CHAIN_DEPTH)
        .map(|_| {
            problem
                .add_package(0, VERSIONS_PER_PACKAGE - 1, 0)
                .unwrap()
        })
        .collect();
    for id in &chain {
        problem.mark_required(*id).unwrap();
    }
    for window in chain.windows(2) {
        let (from, to) = (window[0], window[1]);
        for v in 0..VERSIONS_PER_PACKAGE {
            let dep_lo = (v - 1).max(0);
            let dep_hi = v.min(VERSIONS_PER_PACKAGE - 1);
            problem.add_version_constraint(from, v, to, dep_lo, dep_hi).unwrap();
        }
    }

    for i in 0..EXTRA_PACKAGES {
        let extra = problem.add_package(0, VERSIONS_PER_PACKAGE - 1, 0).unwrap();
        if i % 2 == 0 {
            problem.mark_suspicious(extra).unwrap();
        } else {
            problem.mark_preferred_at_latest(extra, 3).unwrap();
        }
    }

    problem
}

fn bench_large_case(c: &mut Criterion) {
    c.bench_function("large_case", |b| {
        b.iter_batched(
            build_large_problem,
            |problem| problem.solve().unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_large_case);
criterion_main!(benches);
