// SPDX-License-Identifier: MPL-2.0

//! The search driver: plain DFS with value-ordered binary branching for
//! finding one solution, wrapped in a restart branch-and-bound loop that
//! calls back into the lex-constrain operator on every improving
//! solution.

use log::{debug, trace};

use super::branch::BranchingSchedule;
use super::space::Space;
use super::vars::VarId;
use crate::lexconstrain;

/// Caller-supplied bounds on how much search to do. The search core itself
/// has no notion of a timeout; this is the externally-imposed guard callers
/// are expected to provide.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    /// Stop exploring once this many search-tree nodes have been visited.
    pub max_nodes: Option<u64>,
    /// Stop restarting once this many incumbents have been found.
    pub max_restarts: Option<u64>,
}

/// Counters mirroring the propagate/fail/node/depth/memory line the original
/// Gecode driver printed per trial solution under `#ifdef DEBUG`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub fails: u64,
    pub restarts: u64,
    pub propagation_rounds: u64,
    pub truncated: bool,
}

fn dfs_first_solution(
    schedule: &BranchingSchedule,
    mut space: Space,
    limits: &SearchLimits,
    stats: &mut SearchStats,
) -> Option<Space> {
    stats.propagation_rounds += 1;
    if space.propagate_to_fixpoint().is_err() {
        stats.fails += 1;
        return None;
    }
    stats.nodes += 1;
    if let Some(max_nodes) = limits.max_nodes {
        if stats.nodes > max_nodes {
            trace!("node budget exhausted at {} nodes", stats.nodes);
            stats.truncated = true;
            return None;
        }
    }

    let Some((var, val)) = schedule.next_decision(&space) else {
        return Some(space);
    };

    let mut assign = space.clone();
    assign.domain_mut(var).fix(val);
    if let Some(sol) = dfs_first_solution(schedule, assign, limits, stats) {
        return Some(sol);
    }
    if stats.truncated {
        return None;
    }

    space.domain_mut(var).remove_value(val);
    if space.domain(var).is_empty() {
        return None;
    }
    dfs_first_solution(schedule, space, limits, stats)
}

/// Runs restart branch-and-bound from `root` (a fully finalized but
/// unsearched space) until the engine reports no further improving solution.
/// `cost_vars` must be ordered least significant first. Returns the last
/// retained (lex-optimal) solution, or `None` if the problem is infeasible.
pub(crate) fn restart_branch_and_bound(
    root: &Space,
    schedule: &BranchingSchedule,
    cost_vars: &[VarId],
    limits: SearchLimits,
) -> (Option<Space>, SearchStats) {
    let mut stats = SearchStats::default();
    let mut best: Option<Space> = None;
    loop {
        if let Some(max_restarts) = limits.max_restarts {
            if stats.restarts >= max_restarts {
                stats.truncated = true;
                break;
            }
        }

        let candidate_root = match &best {
            None => root.clone(),
            Some(best_space) => {
                let mut r = root.clone();
                lexconstrain::post_less_than_best(&mut r, cost_vars, best_space);
                r
            }
        };

        match dfs_first_solution(schedule, candidate_root, &limits, &mut stats) {
            Some(solution) => {
                stats.restarts += 1;
                debug!(
                    "restart {}: new incumbent (nodes={}, fails={})",
                    stats.restarts, stats.nodes, stats.fails
                );
                #[cfg(feature = "debug-aggregate-cost")]
                trace!(
                    "restart {}: aggregate cost {}",
                    stats.restarts,
                    aggregate_cost(&solution, cost_vars)
                );
                best = Some(solution);
            }
            None => break,
        }
    }
    (best, stats)
}

/// The "aggregate linear cost" debugging path: folds the lex cost vector
/// into one weighted sum, each entry weighted so it dominates every entry
/// before it. Kept only to sanity-check the vector formulation against a
/// single number while tracing a run; never used to drive search, since the
/// weight growth this requires eats into the representable range well
/// before a vector of any real size would.
#[cfg(feature = "debug-aggregate-cost")]
fn aggregate_cost(space: &Space, cost_vars: &[VarId]) -> i64 {
    const WEIGHT_STEP: i64 = 1_000_000;
    let mut acc: i64 = 0;
    let mut weight: i64 = 1;
    for &v in cost_vars {
        let val = space.domain(v).value().unwrap_or(0) as i64;
        acc += val * weight;
        weight = weight.saturating_mul(WEIGHT_STEP);
    }
    acc
}
