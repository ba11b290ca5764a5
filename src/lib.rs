// SPDX-License-Identifier: MPL-2.0

//! Lexicographically-optimal package version selection.
//!
//! Given a set of packages, each with a candidate version range, and a set of
//! version-conditional dependency edges between them, this crate finds an
//! assignment of one version (or "disabled") to every package that satisfies
//! every edge, preferring solutions in this strict priority order:
//!
//! 1. disable as few *required* packages as possible,
//! 2. then as few *induced* (ordinary, non-suspicious) packages as possible,
//! 3. then as few *suspicious* packages as possible,
//! 4. then as few packages overall as possible,
//! 5. then leave as many weighted-preferred packages at their latest version
//!    as possible,
//! 6. then leave as many of the remaining packages at their latest version
//!    as possible.
//!
//! When a dependency can't be satisfied, disabling the dependent is always
//! preferred over leaving the graph inconsistent; the priority order above
//! exists to choose, among the many ways to restore consistency, the one a
//! human would consider least disruptive.
//!
//! # Example
//!
//! ```
//! use dep_select::VersionProblem;
//!
//! let mut problem = VersionProblem::new(2);
//! let a = problem.add_package(1, 3, 1).unwrap();
//! let b = problem.add_package(1, 2, 1).unwrap();
//! // a@3 depends on b in [2, 2].
//! problem.add_version_constraint(a, 3, b, 2, 2).unwrap();
//! problem.mark_required(a).unwrap();
//! problem.mark_required(b).unwrap();
//!
//! let solution = problem.solve().unwrap().expect("feasible");
//! assert_eq!(solution.package_version(a).unwrap(), 3);
//! assert_eq!(solution.package_version(b).unwrap(), 2);
//! assert_eq!(solution.disabled_count(), 0);
//! ```
//!
//! # Solving
//!
//! [`VersionProblem::solve`] runs to completion with no resource limits.
//! [`VersionProblem::solve_with_limits`] additionally accepts a
//! [`SearchLimits`] and returns the [`SearchStats`] the search accumulated,
//! for callers embedding this in a budget-constrained service.
//!
//! # Errors
//!
//! Builder and readout calls return [`SolveError`] for caller mistakes (an
//! unregistered package id, exceeding the declared capacity, reading out
//! before solving). Infeasibility is not an error: [`VersionProblem::solve`]
//! returns `Ok(None)` when no assignment satisfies every dependency edge.

#![warn(missing_docs)]

mod engine;
mod error;
mod finalize;
mod lexconstrain;
mod problem;
mod readout;
mod types;

pub use engine::{Branching, SearchLimits, SearchStats};
pub use error::SolveError;
pub use problem::VersionProblem;
pub use readout::Solution;
pub use types::{PackageId, MAX_PREFERRED_WEIGHT, MAX_TRUST_LEVEL, MIN_TRUST_LEVEL, UNRESOLVED_VARIABLE};
