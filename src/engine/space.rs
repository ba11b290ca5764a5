// SPDX-License-Identifier: MPL-2.0

//! A `Space` is one node of the search tree: a full, independent set of
//! variable domains plus the constraints that narrow them. The search driver
//! clones spaces freely while branching: each branch choice and each restart
//! works from its own deep copy rather than sharing mutable state.

use super::arena::{Arena, Id};
use super::constraint::{Constraint, Infeasible};
use super::domain::Domain;
use super::vars::{BoolVarId, VarId};

#[derive(Clone)]
pub(crate) struct Space {
    vars: Vec<Domain>,
    constraints: Arena<Constraint>,
    watch: Vec<Vec<Id<Constraint>>>,
}

impl Space {
    pub(crate) fn new() -> Self {
        Space {
            vars: Vec::new(),
            constraints: Arena::new(),
            watch: Vec::new(),
        }
    }

    pub(crate) fn new_int_var(&mut self, lo: i32, hi: i32) -> VarId {
        let id = VarId::from_raw(self.vars.len());
        self.vars.push(Domain::range(lo, hi));
        self.watch.push(Vec::new());
        id
    }

    pub(crate) fn new_bool_var(&mut self) -> BoolVarId {
        let id = VarId::from_raw(self.vars.len());
        self.vars.push(Domain::bool());
        self.watch.push(Vec::new());
        id
    }

    pub(crate) fn new_const_bool(&mut self, value: bool) -> BoolVarId {
        let id = self.new_bool_var();
        self.vars[id.index()].fix(value as i32);
        id
    }

    pub(crate) fn domain(&self, v: VarId) -> &Domain {
        &self.vars[v.index()]
    }

    pub(crate) fn domain_mut(&mut self, v: VarId) -> &mut Domain {
        &mut self.vars[v.index()]
    }

    pub(crate) fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Posts a constraint and registers it on the watch list of every
    /// variable it touches. Does not propagate it yet; call
    /// [`Space::propagate_to_fixpoint`] once all constraints for this round
    /// have been posted.
    pub(crate) fn post(&mut self, c: Constraint) -> Id<Constraint> {
        let watched = c.watched_vars();
        let id = self.constraints.alloc(c);
        for v in watched {
            self.watch[v.index()].push(id);
        }
        id
    }

    /// Runs constraint propagation to a local fixpoint: repeatedly
    /// re-examines every constraint whose watched variables changed on the
    /// previous pass, until nothing changes or a domain empties out.
    pub(crate) fn propagate_to_fixpoint(&mut self) -> Result<(), Infeasible> {
        let mut dirty: Vec<bool> = vec![true; self.constraints.len()];
        loop {
            let mut any = false;
            for i in 0..self.constraints.len() {
                if !dirty[i] {
                    continue;
                }
                dirty[i] = false;
                let id = Id::from_raw(i);
                let changed = self.constraints[id].propagate(&mut self.vars)?;
                if changed {
                    any = true;
                    for v in self.constraints[id].watched_vars() {
                        for &dep in &self.watch[v.index()] {
                            dirty[dep.into_raw()] = true;
                        }
                    }
                }
            }
            if !any {
                return Ok(());
            }
        }
    }

    pub(crate) fn is_ground(&self, v: VarId) -> bool {
        self.vars[v.index()].is_singleton()
    }
}
