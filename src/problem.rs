// SPDX-License-Identifier: MPL-2.0

//! The problem builder: accepts packages and dependency edges, allocates
//! decision variables, and records per-package metadata.

use crate::engine::branch::Branching;
use crate::engine::constraint::Constraint;
use crate::engine::space::Space;
use crate::engine::vars::{BoolVarId, VarId};
use crate::engine::SearchLimits;
use crate::error::SolveError;
use crate::readout::Solution;
use crate::types::{PackageId, MAX_PREFERRED_WEIGHT};
use crate::{finalize, SearchStats};

/// A package-version selection problem under construction.
///
/// Build one with [`VersionProblem::new`], register packages with
/// [`add_package`](VersionProblem::add_package), describe their
/// version-conditional dependencies with
/// [`add_version_constraint`](VersionProblem::add_version_constraint), mark
/// priority with [`mark_required`](VersionProblem::mark_required) /
/// [`mark_suspicious`](VersionProblem::mark_suspicious) /
/// [`mark_preferred_at_latest`](VersionProblem::mark_preferred_at_latest),
/// then call [`solve`](VersionProblem::solve).
pub struct VersionProblem {
    pub(crate) size: usize,
    pub(crate) cur_package: usize,
    pub(crate) space: Space,
    pub(crate) version_vars: Vec<VarId>,
    pub(crate) disabled_vars: Vec<BoolVarId>,
    pub(crate) at_latest_vars: Vec<BoolVarId>,
    pub(crate) is_required: Vec<bool>,
    pub(crate) is_suspicious: Vec<bool>,
    pub(crate) pref_latest_weight: Vec<i32>,
    pub(crate) branching: Branching,
}

impl VersionProblem {
    /// Pre-allocates `size` package slots. All weights start at zero.
    pub fn new(size: usize) -> Self {
        Self::with_branching(size, Branching::Best)
    }

    /// Like [`new`](VersionProblem::new), but selects the branching schedule
    /// explicitly. [`Branching::Dumb`] exists only to stress-test the
    /// optimizer and should never be used in production code.
    pub fn with_branching(size: usize, branching: Branching) -> Self {
        VersionProblem {
            size,
            cur_package: 0,
            space: Space::new(),
            version_vars: Vec::with_capacity(size),
            disabled_vars: Vec::with_capacity(size),
            at_latest_vars: Vec::with_capacity(size),
            is_required: Vec::with_capacity(size),
            is_suspicious: Vec::with_capacity(size),
            pref_latest_weight: Vec::with_capacity(size),
            branching,
        }
    }

    /// Registers a new package with candidate version domain `[min, max]`.
    ///
    /// `current` is accepted for API compatibility with callers that track a
    /// currently-installed version, but it does not constrain the model in
    /// any way; it is not even stored.
    pub fn add_package(&mut self, min: i32, max: i32, current: i32) -> Result<PackageId, SolveError> {
        let _ = current;
        if self.cur_package == self.size {
            return Err(SolveError::CapacityExceeded { size: self.size });
        }
        let version = self.space.new_int_var(min, max);
        let at_latest = self.space.new_bool_var();
        self.space.post(Constraint::ReifiedEq {
            x: version,
            k: max,
            b: at_latest,
        });
        let disabled = self.space.new_bool_var();

        let id = PackageId::from_index(self.cur_package);
        self.version_vars.push(version);
        self.at_latest_vars.push(at_latest);
        self.disabled_vars.push(disabled);
        self.is_required.push(false);
        self.is_suspicious.push(false);
        self.pref_latest_weight.push(0);
        self.cur_package += 1;
        Ok(id)
    }

    fn check_package(&self, pkg: PackageId) -> Result<(), SolveError> {
        if pkg.index() >= self.cur_package {
            Err(SolveError::InvalidPackageId {
                package: pkg,
                registered: self.cur_package,
            })
        } else {
            Ok(())
        }
    }

    /// Records "if `pkg` is chosen at version `v`, then `dep_pkg` must be
    /// chosen in `[dep_min, dep_max]` unless `dep_pkg` is disabled".
    pub fn add_version_constraint(
        &mut self,
        pkg: PackageId,
        v: i32,
        dep_pkg: PackageId,
        dep_min: i32,
        dep_max: i32,
    ) -> Result<(), SolveError> {
        self.check_package(pkg)?;
        self.check_package(dep_pkg)?;

        let version_match = self.space.new_bool_var();
        self.space.post(Constraint::ReifiedEq {
            x: self.version_vars[pkg.index()],
            k: v,
            b: version_match,
        });

        let depend_match = self.space.new_bool_var();
        self.space.post(Constraint::ReifiedDom {
            x: self.version_vars[dep_pkg.index()],
            lo: dep_min,
            hi: dep_max,
            b: depend_match,
        });

        let predicated_depend_match = self.space.new_bool_var();
        self.space.post(Constraint::BoolOrEq {
            a: self.disabled_vars[dep_pkg.index()],
            b: depend_match,
            r: predicated_depend_match,
        });

        self.space.post(Constraint::Implies {
            p: version_match,
            q: predicated_depend_match,
        });

        Ok(())
    }

    /// Marks `pkg` as required: disabling it incurs the highest cost.
    pub fn mark_required(&mut self, pkg: PackageId) -> Result<(), SolveError> {
        self.check_package(pkg)?;
        self.is_required[pkg.index()] = true;
        Ok(())
    }

    /// Marks `pkg` as suspicious: a candidate for removal, cheaper to
    /// disable than an induced package.
    pub fn mark_suspicious(&mut self, pkg: PackageId) -> Result<(), SolveError> {
        self.check_package(pkg)?;
        self.is_suspicious[pkg.index()] = true;
        Ok(())
    }

    /// Records a preference for `pkg` to end up at its latest version, with
    /// `weight` clamped into `[0, MAX_PREFERRED_WEIGHT]`.
    ///
    /// A naive clamp written as `max(MAX, min(0, w))` would be inverted;
    /// this uses the correct form `max(0, min(MAX, w))`.
    pub fn mark_preferred_at_latest(&mut self, pkg: PackageId, weight: i32) -> Result<(), SolveError> {
        self.check_package(pkg)?;
        let clamped = weight.clamp(0, MAX_PREFERRED_WEIGHT);
        self.pref_latest_weight[pkg.index()] = clamped;
        Ok(())
    }

    /// Finalizes the problem and runs restart branch-and-bound with no
    /// search limits. Returns `Ok(None)` if the problem is infeasible.
    pub fn solve(self) -> Result<Option<Solution>, SolveError> {
        self.solve_with_limits(SearchLimits::default())
            .map(|(solution, _stats)| solution)
    }

    /// Like [`solve`](VersionProblem::solve), but also returns the
    /// [`SearchStats`] counters and accepts a [`SearchLimits`] guard.
    pub fn solve_with_limits(
        self,
        limits: SearchLimits,
    ) -> Result<(Option<Solution>, SearchStats), SolveError> {
        let finalized = finalize::finalize(self);
        let (solved_space, stats) = crate::engine::search::restart_branch_and_bound(
            &finalized.space,
            &finalized.schedule,
            &finalized.cost_vars,
            limits,
        );
        let solution = solved_space.map(move |space| {
            Solution::new(
                space,
                finalized.version_vars,
                finalized.disabled_vars,
                finalized.total_disabled,
            )
        });
        Ok((solution, stats))
    }
}
