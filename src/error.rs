// SPDX-License-Identifier: MPL-2.0

//! Errors surfaced by [`VersionProblem`](crate::VersionProblem).

use thiserror::Error;

use crate::types::PackageId;

/// Errors that may occur while building or solving a
/// [`VersionProblem`](crate::VersionProblem).
///
/// Infeasibility is *not* a variant here: `solve` returning no solution is a
/// legitimate outcome (`Ok(None)`), not caller misuse. Every variant below
/// instead covers a caller mistake: an id out of range, calling readout
/// before `solve`, or exceeding the declared capacity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// [`add_package`](crate::VersionProblem::add_package) was called more
    /// times than the `size` passed to [`new`](crate::VersionProblem::new).
    #[error("package capacity of {size} slots exceeded")]
    CapacityExceeded {
        /// The capacity declared at construction time.
        size: usize,
    },

    /// A constraint-add or readout call referenced a package id that has not
    /// been registered yet.
    #[error("package id {package:?} has not been registered (only {registered} packages exist)")]
    InvalidPackageId {
        /// The offending id.
        package: PackageId,
        /// How many packages actually exist at the time of the call.
        registered: usize,
    },

    /// A readout call was made before [`solve`](crate::VersionProblem::solve)
    /// produced a result.
    #[error("the problem has not been solved yet")]
    NotFinalized,
}
