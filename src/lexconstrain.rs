// SPDX-License-Identifier: MPL-2.0

//! The lexicographic "less-than-best" restart constraint.
//!
//! Given a fresh root space and an incumbent (fully ground) solution, posts a
//! borrow chain that forces any complete assignment of `cost_vars` in the
//! fresh space to be strictly lexicographically less than the incumbent's
//! values, with the last entry of `cost_vars` most significant.

use crate::engine::constraint::Constraint;
use crate::engine::space::Space;
use crate::engine::vars::VarId;

/// Posts the borrow chain described above onto `space`. `cost_vars` must be
/// ordered least-significant-first, matching `Finalized::cost_vars`.
/// `best` must be a fully ground (solved) space.
pub(crate) fn post_less_than_best(space: &mut Space, cost_vars: &[VarId], best: &Space) {
    let k = cost_vars.len();
    let mut borrow_in = space.new_const_bool(false);
    for (i, &cur) in cost_vars.iter().enumerate() {
        let best_val = best
            .domain(cur)
            .value()
            .expect("incumbent's cost variables must be ground");
        let borrow_out = if i + 1 == k {
            space.new_const_bool(true)
        } else {
            space.new_bool_var()
        };
        space.post(Constraint::LexBorrow {
            cur,
            best_val,
            borrow_in,
            borrow_out,
        });
        borrow_in = borrow_out;
    }
}
