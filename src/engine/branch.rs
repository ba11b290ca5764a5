// SPDX-License-Identifier: MPL-2.0

//! The branching schedule: an ordered list of variable groups, each
//! with a domain-size variable-selection rule and a value-selection policy.
//! Earlier groups are exhausted (every variable in them ground) before later
//! ones are considered, exactly like a sequence of Gecode `branch()` calls.

use std::cmp::Reverse;

use priority_queue::PriorityQueue;

use super::space::Space;
use super::vars::VarId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValuePolicy {
    /// Try the smallest remaining value first.
    Min,
    /// Try the largest remaining value first.
    Max,
}

impl ValuePolicy {
    fn pick(self, space: &Space, var: VarId) -> i32 {
        let d = space.domain(var);
        match self {
            ValuePolicy::Min => d.min(),
            ValuePolicy::Max => d.max(),
        }
    }

    fn flipped(self) -> Self {
        match self {
            ValuePolicy::Min => ValuePolicy::Max,
            ValuePolicy::Max => ValuePolicy::Min,
        }
    }
}

pub(crate) struct BranchGroup {
    pub(crate) vars: Vec<VarId>,
    pub(crate) policy: ValuePolicy,
}

/// A complete, ordered branching schedule as posted during finalization.
pub(crate) struct BranchingSchedule {
    groups: Vec<BranchGroup>,
}

/// Which of the two value-ordering schedules to use. `Dumb` inverts every value
/// choice and exists purely to stress-test the optimizer; it is never the
/// default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Branching {
    #[default]
    Best,
    Dumb,
}

impl BranchingSchedule {
    pub(crate) fn new(groups: Vec<BranchGroup>, style: Branching) -> Self {
        let groups = if style == Branching::Dumb {
            groups
                .into_iter()
                .map(|g| BranchGroup {
                    vars: g.vars,
                    policy: g.policy.flipped(),
                })
                .collect()
        } else {
            groups
        };
        BranchingSchedule { groups }
    }

    /// Finds the next (variable, value-to-try-first) decision, scanning
    /// groups in order and picking the smallest-remaining-domain variable
    /// within the first group that still has an unfixed variable.
    pub(crate) fn next_decision(&self, space: &Space) -> Option<(VarId, i32)> {
        for group in &self.groups {
            if let Some(var) = pick_smallest_domain(space, &group.vars) {
                let val = group.policy.pick(space, var);
                return Some((var, val));
            }
        }
        None
    }
}

fn pick_smallest_domain(space: &Space, vars: &[VarId]) -> Option<VarId> {
    let mut pq: PriorityQueue<VarId, Reverse<u64>> = PriorityQueue::new();
    for &v in vars {
        if !space.is_ground(v) {
            pq.push(v, Reverse(space.domain(v).size()));
        }
    }
    pq.pop().map(|(v, _)| v)
}
