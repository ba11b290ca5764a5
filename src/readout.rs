// SPDX-License-Identifier: MPL-2.0

//! The readout API: queries over a solved [`VersionProblem`].

use crate::engine::space::Space;
use crate::engine::vars::VarId;
use crate::error::SolveError;
use crate::types::{PackageId, UNRESOLVED_VARIABLE};

/// A solved [`VersionProblem`](crate::VersionProblem): the lex-optimal
/// assignment found by [`VersionProblem::solve`](crate::VersionProblem::solve).
///
/// Every query below is a plain domain lookup; by the time a `Solution`
/// exists, restart branch-and-bound has already driven every variable it
/// reports on to a single value, so these never themselves fail to resolve a
/// registered package id.
pub struct Solution {
    space: Space,
    version_vars: Vec<VarId>,
    disabled_vars: Vec<VarId>,
    total_disabled: VarId,
}

impl Solution {
    pub(crate) fn new(
        space: Space,
        version_vars: Vec<VarId>,
        disabled_vars: Vec<VarId>,
        total_disabled: VarId,
    ) -> Self {
        Solution {
            space,
            version_vars,
            disabled_vars,
            total_disabled,
        }
    }

    fn index_of(&self, pkg: PackageId) -> Result<usize, SolveError> {
        let idx = pkg.index();
        if idx >= self.version_vars.len() {
            Err(SolveError::InvalidPackageId {
                package: pkg,
                registered: self.version_vars.len(),
            })
        } else {
            Ok(idx)
        }
    }

    /// The version chosen for `pkg`, or [`UNRESOLVED_VARIABLE`] if, somehow,
    /// it was not ground (this cannot happen for a `Solution` produced by
    /// [`VersionProblem::solve`](crate::VersionProblem::solve)).
    pub fn package_version(&self, pkg: PackageId) -> Result<i32, SolveError> {
        let idx = self.index_of(pkg)?;
        Ok(self
            .space
            .domain(self.version_vars[idx])
            .value()
            .unwrap_or(UNRESOLVED_VARIABLE))
    }

    /// Whether `pkg` was disabled (dropped from the dependency graph) in this
    /// solution.
    pub fn package_disabled(&self, pkg: PackageId) -> Result<bool, SolveError> {
        let idx = self.index_of(pkg)?;
        Ok(self.space.domain(self.disabled_vars[idx]).value() == Some(1))
    }

    /// The lower bound `pkg` was registered with.
    pub fn package_min(&self, pkg: PackageId) -> Result<i32, SolveError> {
        let idx = self.index_of(pkg)?;
        Ok(self.space.domain(self.version_vars[idx]).min())
    }

    /// The upper bound `pkg` was registered with.
    pub fn package_max(&self, pkg: PackageId) -> Result<i32, SolveError> {
        let idx = self.index_of(pkg)?;
        Ok(self.space.domain(self.version_vars[idx]).max())
    }

    /// How many packages were disabled in total (the raw sum, distinct from
    /// the three weighted disabled-count terms used to rank solutions).
    pub fn disabled_count(&self) -> i32 {
        self.space
            .domain(self.total_disabled)
            .value()
            .unwrap_or(UNRESOLVED_VARIABLE)
    }
}
