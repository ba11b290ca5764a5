// SPDX-License-Identifier: MPL-2.0

//! The finalizer: pins unused package slots, builds the five-term
//! lexicographic cost vector, and assembles the branching schedule. Consumes
//! a [`VersionProblem`] and produces a [`Finalized`] space ready for
//! [`crate::engine::search::restart_branch_and_bound`].

use crate::engine::branch::{BranchGroup, BranchingSchedule, ValuePolicy};
use crate::engine::constraint::Constraint;
use crate::engine::vars::VarId;
use crate::engine::space::Space;
use crate::problem::VersionProblem;
use crate::types::MAX_TRUST_LEVEL;

/// A fully posted, ready-to-search space together with the handles the
/// search driver and readout layer need afterward.
pub(crate) struct Finalized {
    pub(crate) space: Space,
    pub(crate) schedule: BranchingSchedule,
    /// Least-significant-first, matching the cost vector.
    pub(crate) cost_vars: [VarId; 5],
    pub(crate) version_vars: Vec<VarId>,
    pub(crate) disabled_vars: Vec<VarId>,
    pub(crate) total_disabled: VarId,
}

pub(crate) fn finalize(problem: VersionProblem) -> Finalized {
    let VersionProblem {
        size,
        cur_package,
        mut space,
        mut version_vars,
        mut disabled_vars,
        mut at_latest_vars,
        mut is_required,
        mut is_suspicious,
        mut pref_latest_weight,
        branching,
    } = problem;

    // Pin every slot beyond the packages actually registered: version fixed
    // to -1 (never a real candidate), disabled fixed to 1 (always disabled),
    // at_latest fixed to 0. None of this is observable through the public
    // readout API since PackageId never names an unregistered slot.
    for _ in cur_package..size {
        let version = space.new_int_var(-1, -1);
        let disabled = space.new_const_bool(true);
        let at_latest = space.new_const_bool(false);
        version_vars.push(version);
        disabled_vars.push(disabled);
        at_latest_vars.push(at_latest);
        is_required.push(false);
        is_suspicious.push(false);
        pref_latest_weight.push(0);
    }

    let total_required_disabled = space.new_int_var(0, size as i32);
    space.post(Constraint::LinearEq {
        terms: weighted(&is_required, &disabled_vars),
        y: total_required_disabled,
    });

    let is_induced: Vec<bool> = is_required
        .iter()
        .zip(is_suspicious.iter())
        .map(|(&r, &s)| !r && !s)
        .collect();
    let total_induced_disabled = space.new_int_var(0, size as i32);
    space.post(Constraint::LinearEq {
        terms: weighted(&is_induced, &disabled_vars),
        y: total_induced_disabled,
    });

    let total_suspicious_disabled = space.new_int_var(0, size as i32);
    space.post(Constraint::LinearEq {
        terms: weighted(&is_suspicious, &disabled_vars),
        y: total_suspicious_disabled,
    });

    let total_disabled_max = (size as i32).saturating_mul(MAX_TRUST_LEVEL);
    let total_disabled = space.new_int_var(0, total_disabled_max);
    space.post(Constraint::LinearEq {
        terms: disabled_vars.iter().map(|&d| (1, d)).collect(),
        y: total_disabled,
    });

    // Negate the preference weights: a package with a higher weight must
    // contribute a more negative term, so that minimizing the aggregate
    // favors packages sitting at their latest version.
    for w in pref_latest_weight.iter_mut() {
        *w = -*w;
    }
    let pref_weight_bound = (size as i32).saturating_mul(crate::types::MAX_PREFERRED_WEIGHT);
    let total_preferred_at_latest = space.new_int_var(-pref_weight_bound, pref_weight_bound);
    space.post(Constraint::LinearEq {
        terms: pref_latest_weight
            .iter()
            .zip(at_latest_vars.iter())
            .map(|(&w, &v)| (w, v))
            .collect(),
        y: total_preferred_at_latest,
    });

    // Among packages with no explicit preference weight, still prefer more
    // of them sitting at their latest version: contribute -1 per such
    // package that is at_latest.
    let not_pref_weights: Vec<i32> = pref_latest_weight
        .iter()
        .map(|&w| if w == 0 { -1 } else { 0 })
        .collect();
    let total_not_preferred_at_latest = space.new_int_var(-(size as i32), size as i32);
    space.post(Constraint::LinearEq {
        terms: not_pref_weights
            .iter()
            .zip(at_latest_vars.iter())
            .map(|(&w, &v)| (w, v))
            .collect(),
        y: total_not_preferred_at_latest,
    });

    let schedule = BranchingSchedule::new(
        vec![
            BranchGroup {
                vars: disabled_vars.clone(),
                policy: ValuePolicy::Min,
            },
            BranchGroup {
                vars: version_vars.clone(),
                policy: ValuePolicy::Max,
            },
            BranchGroup {
                vars: vec![total_required_disabled],
                policy: ValuePolicy::Min,
            },
            BranchGroup {
                vars: vec![total_induced_disabled],
                policy: ValuePolicy::Min,
            },
            BranchGroup {
                vars: vec![total_suspicious_disabled],
                policy: ValuePolicy::Min,
            },
            BranchGroup {
                vars: vec![total_disabled],
                policy: ValuePolicy::Min,
            },
            BranchGroup {
                vars: at_latest_vars.clone(),
                policy: ValuePolicy::Max,
            },
            BranchGroup {
                vars: vec![total_preferred_at_latest],
                policy: ValuePolicy::Max,
            },
            BranchGroup {
                vars: vec![total_not_preferred_at_latest],
                policy: ValuePolicy::Max,
            },
        ],
        branching,
    );

    Finalized {
        space,
        schedule,
        cost_vars: [
            total_not_preferred_at_latest,
            total_preferred_at_latest,
            total_suspicious_disabled,
            total_induced_disabled,
            total_required_disabled,
        ],
        version_vars,
        disabled_vars,
        total_disabled,
    }
}

fn weighted(flags: &[bool], vars: &[VarId]) -> Vec<(i32, VarId)> {
    flags
        .iter()
        .zip(vars.iter())
        .map(|(&flag, &v)| (if flag { 1 } else { 0 }, v))
        .collect()
}
