// SPDX-License-Identifier: MPL-2.0

//! The handful of reified and linear constraint kinds the model needs. Each
//! variant knows how to narrow the domains it touches towards a fixpoint; it
//! never needs full arc-consistency because every variable it could still
//! leave undetermined is covered by the branching schedule, so
//! generate-and-test eventually grounds it.

use super::domain::Domain;
use super::vars::{BoolVarId, VarId};

/// Returned by [`Constraint::propagate`] when a domain would become empty.
pub(crate) struct Infeasible;

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[derive(Clone, Debug)]
pub(crate) enum Constraint {
    /// `x == k <=> b`
    ReifiedEq { x: VarId, k: i32, b: BoolVarId },
    /// `x in [lo, hi] <=> b`
    ReifiedDom {
        x: VarId,
        lo: i32,
        hi: i32,
        b: BoolVarId,
    },
    /// `r == (a OR b)`, not itself reified: `r` is a plain variable defined
    /// by the disjunction, the way `predicated_depend_match` is.
    BoolOrEq {
        a: BoolVarId,
        b: BoolVarId,
        r: BoolVarId,
    },
    /// `p => q`
    Implies { p: BoolVarId, q: BoolVarId },
    /// `sum(w_i * x_i) == y`, propagated forward only (domain bounds of the
    /// terms narrow `y`; every `x_i` is covered by the branching schedule so
    /// reverse propagation is not required for correctness, only speed).
    LinearEq { terms: Vec<(i32, VarId)>, y: VarId },
    /// One link of the lex "less-than-best" borrow chain:
    /// `borrow_out <=> (cur - best_val - borrow_in < 0)`.
    LexBorrow {
        cur: VarId,
        best_val: i32,
        borrow_in: BoolVarId,
        borrow_out: BoolVarId,
    },
}

impl Constraint {
    /// Which variables, when their domain changes, require re-examining this
    /// constraint.
    pub(crate) fn watched_vars(&self) -> Vec<VarId> {
        match self {
            Constraint::ReifiedEq { x, b, .. } => vec![*x, *b],
            Constraint::ReifiedDom { x, b, .. } => vec![*x, *b],
            Constraint::BoolOrEq { a, b, r } => vec![*a, *b, *r],
            Constraint::Implies { p, q } => vec![*p, *q],
            Constraint::LinearEq { terms, y } => {
                let mut vars: Vec<VarId> = terms.iter().map(|(_, v)| *v).collect();
                vars.push(*y);
                vars
            }
            Constraint::LexBorrow {
                cur,
                borrow_in,
                borrow_out,
                ..
            } => vec![*cur, *borrow_in, *borrow_out],
        }
    }

    /// Narrows the domains this constraint touches. Returns `Ok(true)` if any
    /// domain shrank, `Ok(false)` if nothing changed, `Err(Infeasible)` if a
    /// domain would become empty.
    pub(crate) fn propagate(&self, doms: &mut [Domain]) -> Result<bool, Infeasible> {
        let mut changed = false;
        match *self {
            Constraint::ReifiedEq { x, k, b } => {
                if let Some(bv) = doms[b.index()].value() {
                    if bv == 1 {
                        changed |= doms[x.index()].fix(k);
                    } else {
                        changed |= doms[x.index()].remove_value(k);
                    }
                } else if !doms[x.index()].contains(k) {
                    changed |= doms[b.index()].fix(0);
                } else if doms[x.index()].is_singleton() {
                    changed |= doms[b.index()].fix(1);
                }
            }
            Constraint::ReifiedDom { x, lo, hi, b } => {
                if let Some(bv) = doms[b.index()].value() {
                    if bv == 1 {
                        changed |= doms[x.index()].retain_range(lo, hi);
                    } else {
                        changed |= doms[x.index()].remove_range(lo, hi);
                    }
                } else if doms[x.index()].disjoint_from_range(lo, hi) {
                    changed |= doms[b.index()].fix(0);
                } else if doms[x.index()].subset_of_range(lo, hi) {
                    changed |= doms[b.index()].fix(1);
                }
            }
            Constraint::BoolOrEq { a, b, r } => {
                let av = doms[a.index()].value();
                let bv = doms[b.index()].value();
                if av == Some(1) || bv == Some(1) {
                    changed |= doms[r.index()].fix(1);
                } else if av == Some(0) && bv == Some(0) {
                    changed |= doms[r.index()].fix(0);
                }
                match doms[r.index()].value() {
                    Some(0) => {
                        changed |= doms[a.index()].fix(0);
                        changed |= doms[b.index()].fix(0);
                    }
                    Some(1) => {
                        if av == Some(0) {
                            changed |= doms[b.index()].fix(1);
                        }
                        if bv == Some(0) {
                            changed |= doms[a.index()].fix(1);
                        }
                    }
                    _ => {}
                }
            }
            Constraint::Implies { p, q } => {
                if doms[p.index()].value() == Some(1) {
                    changed |= doms[q.index()].fix(1);
                }
                if doms[q.index()].value() == Some(0) {
                    changed |= doms[p.index()].fix(0);
                }
            }
            Constraint::LinearEq { ref terms, y } => {
                let mut sum_min: i64 = 0;
                let mut sum_max: i64 = 0;
                for &(w, v) in terms {
                    let d = &doms[v.index()];
                    if d.is_empty() {
                        return Err(Infeasible);
                    }
                    let (lo, hi) = (d.min() as i64, d.max() as i64);
                    if w >= 0 {
                        sum_min += w as i64 * lo;
                        sum_max += w as i64 * hi;
                    } else {
                        sum_min += w as i64 * hi;
                        sum_max += w as i64 * lo;
                    }
                }
                changed |= doms[y.index()].retain_range(clamp_i32(sum_min), clamp_i32(sum_max));
            }
            Constraint::LexBorrow {
                cur,
                best_val,
                borrow_in,
                borrow_out,
            } => {
                let cur_d = &doms[cur.index()];
                let bin_d = &doms[borrow_in.index()];
                if cur_d.is_empty() || bin_d.is_empty() {
                    return Err(Infeasible);
                }
                let delta_min = cur_d.min() as i64 - best_val as i64 - bin_d.max() as i64;
                let delta_max = cur_d.max() as i64 - best_val as i64 - bin_d.min() as i64;
                if delta_max < 0 {
                    changed |= doms[borrow_out.index()].fix(1);
                } else if delta_min >= 0 {
                    changed |= doms[borrow_out.index()].fix(0);
                }
            }
        }
        for v in self.watched_vars() {
            if doms[v.index()].is_empty() {
                return Err(Infeasible);
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VarId {
        VarId::from_raw(i)
    }

    #[test]
    fn reified_eq_forward_and_backward() {
        let mut doms = vec![Domain::range(0, 5), Domain::bool()];
        let c = Constraint::ReifiedEq {
            x: v(0),
            k: 3,
            b: v(1),
        };
        doms[1].fix(1);
        c.propagate(&mut doms).unwrap();
        assert_eq!(doms[0].value(), Some(3));

        let mut doms = vec![Domain::range(0, 5), Domain::bool()];
        doms[0].retain_range(0, 2);
        c.propagate(&mut doms).unwrap();
        assert_eq!(doms[1].value(), Some(0));
    }

    #[test]
    fn bool_or_eq_propagates_both_ways() {
        let c = Constraint::BoolOrEq {
            a: v(0),
            b: v(1),
            r: v(2),
        };
        let mut doms = vec![Domain::bool(), Domain::bool(), Domain::bool()];
        doms[0].fix(0);
        doms[2].fix(1);
        c.propagate(&mut doms).unwrap();
        assert_eq!(doms[1].value(), Some(1));
    }

    #[test]
    fn linear_eq_narrows_sum_var() {
        let c = Constraint::LinearEq {
            terms: vec![(1, v(0)), (1, v(1))],
            y: v(2),
        };
        let mut doms = vec![Domain::single(2), Domain::single(3), Domain::range(0, 100)];
        c.propagate(&mut doms).unwrap();
        assert_eq!(doms[2].value(), Some(5));
    }

    #[test]
    fn lex_borrow_forces_value_once_ground() {
        let c = Constraint::LexBorrow {
            cur: v(0),
            best_val: 2,
            borrow_in: v(1),
            borrow_out: v(2),
        };
        let mut doms = vec![Domain::single(1), Domain::single(0), Domain::bool()];
        c.propagate(&mut doms).unwrap();
        assert_eq!(doms[2].value(), Some(1));
    }
}
