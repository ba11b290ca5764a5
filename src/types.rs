// SPDX-License-Identifier: MPL-2.0

//! Publicly exported type aliases and domain constants.

/// Sentinel returned by readout calls for a variable that is not uniquely
/// determined, i.e. [`UNRESOLVED_VARIABLE`].
pub const UNRESOLVED_VARIABLE: i32 = i32::MIN;

/// Lower bound of the cost-domain widening factor used to size
/// `total_disabled`'s initial domain.
pub const MIN_TRUST_LEVEL: i32 = 0;

/// Upper bound of the cost-domain widening factor used to size
/// `total_disabled`'s initial domain.
pub const MAX_TRUST_LEVEL: i32 = 10;

/// Ceiling on [`markPackagePreferredToBeAtLatest`](crate::VersionProblem::mark_preferred_at_latest)'s weight.
pub const MAX_PREFERRED_WEIGHT: i32 = 10;

/// Identifies a package registered with a [`VersionProblem`](crate::VersionProblem).
///
/// Returned by [`VersionProblem::add_package`](crate::VersionProblem::add_package)
/// and accepted by every other builder and readout call. Opaque on purpose:
/// packages are always referenced by the id handed back at registration
/// time, never by reconstructing an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(u32);

impl PackageId {
    pub(crate) fn from_index(index: usize) -> Self {
        PackageId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
