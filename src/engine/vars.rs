// SPDX-License-Identifier: MPL-2.0

//! Variable identifiers. Every decision variable in a [`Space`](super::space::Space),
//! including version variables, disabled flags, `at_latest` flags, aggregate
//! cost variables, and the lex-constrain borrow chain, lives in one flat
//! `Vec<Domain>` and is addressed by a [`VarId`].

use std::fmt;

/// Index of a variable inside a [`Space`](super::space::Space)'s domain vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct VarId(u32);

impl VarId {
    pub(crate) fn from_raw(raw: usize) -> Self {
        VarId(raw as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A [`VarId`] known (by construction) to carry a `{0, 1}`-only domain.
///
/// This is purely documentation at the type level: the underlying storage is
/// identical to [`VarId`], since Gecode-style boolean variables are just
/// integer variables with a narrow domain.
pub(crate) type BoolVarId = VarId;
