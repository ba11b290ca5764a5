// SPDX-License-Identifier: MPL-2.0

//! Finite domains over `i32`, represented as a sorted list of disjoint
//! inclusive ranges. Booleans are just domains that happen to live inside
//! `[0, 1]`; there is no separate boolean representation at this layer.

use std::fmt;

/// The set of values a variable may still take.
///
/// Kept as a small sorted `Vec` of `(lo, hi)` ranges rather than a dense
/// bitset: version ranges in practice are wide (`[0, 1_000_000]`) but the
/// holes punched into them by constraints are few.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Domain {
    ranges: Vec<(i32, i32)>,
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (lo, hi)) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}..={hi}")?;
            }
        }
        write!(f, "}}")
    }
}

impl Domain {
    pub(crate) fn range(lo: i32, hi: i32) -> Self {
        if lo > hi {
            Domain { ranges: Vec::new() }
        } else {
            Domain {
                ranges: vec![(lo, hi)],
            }
        }
    }

    pub(crate) fn single(v: i32) -> Self {
        Domain::range(v, v)
    }

    pub(crate) fn bool() -> Self {
        Domain::range(0, 1)
    }

    pub(crate) fn empty() -> Self {
        Domain { ranges: Vec::new() }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub(crate) fn min(&self) -> i32 {
        self.ranges.first().expect("domain is empty").0
    }

    pub(crate) fn max(&self) -> i32 {
        self.ranges.last().expect("domain is empty").1
    }

    pub(crate) fn size(&self) -> u64 {
        self.ranges
            .iter()
            .map(|(lo, hi)| (*hi - *lo + 1) as u64)
            .sum()
    }

    pub(crate) fn is_singleton(&self) -> bool {
        self.ranges.len() == 1 && self.ranges[0].0 == self.ranges[0].1
    }

    pub(crate) fn value(&self) -> Option<i32> {
        self.is_singleton().then(|| self.ranges[0].0)
    }

    pub(crate) fn contains(&self, v: i32) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if v < lo {
                    std::cmp::Ordering::Greater
                } else if v > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Intersects this domain with `[lo, hi]` in place. Returns `true` if the
    /// domain actually shrank.
    pub(crate) fn retain_range(&mut self, lo: i32, hi: i32) -> bool {
        let before = self.ranges.len();
        let before_size = self.size();
        let mut out = Vec::with_capacity(before);
        for &(a, b) in &self.ranges {
            let new_lo = a.max(lo);
            let new_hi = b.min(hi);
            if new_lo <= new_hi {
                out.push((new_lo, new_hi));
            }
        }
        self.ranges = out;
        self.size() != before_size
    }

    /// Removes `[lo, hi]` from this domain in place. Returns `true` if the
    /// domain actually shrank.
    pub(crate) fn remove_range(&mut self, lo: i32, hi: i32) -> bool {
        let before_size = self.size();
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        for &(a, b) in &self.ranges {
            if b < lo || a > hi {
                out.push((a, b));
                continue;
            }
            if a < lo {
                out.push((a, lo - 1));
            }
            if b > hi {
                out.push((hi + 1, b));
            }
        }
        self.ranges = out;
        self.size() != before_size
    }

    pub(crate) fn remove_value(&mut self, v: i32) -> bool {
        self.remove_range(v, v)
    }

    pub(crate) fn fix(&mut self, v: i32) -> bool {
        self.retain_range(v, v)
    }

    /// `true` iff every value in this domain also lies in `[lo, hi]`.
    pub(crate) fn subset_of_range(&self, lo: i32, hi: i32) -> bool {
        !self.is_empty() && self.min() >= lo && self.max() <= hi
    }

    /// `true` iff this domain has no value in common with `[lo, hi]`.
    pub(crate) fn disjoint_from_range(&self, lo: i32, hi: i32) -> bool {
        self.is_empty() || self.max() < lo || self.min() > hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_range_shrinks_and_reports_change() {
        let mut d = Domain::range(0, 10);
        assert!(d.retain_range(3, 7));
        assert_eq!(d.min(), 3);
        assert_eq!(d.max(), 7);
        assert!(!d.retain_range(3, 7));
    }

    #[test]
    fn remove_range_punches_a_hole() {
        let mut d = Domain::range(0, 10);
        assert!(d.remove_range(4, 6));
        assert!(!d.contains(4));
        assert!(!d.contains(6));
        assert!(d.contains(3));
        assert!(d.contains(7));
        assert_eq!(d.size(), 8);
    }

    #[test]
    fn singleton_and_value() {
        let d = Domain::single(5);
        assert!(d.is_singleton());
        assert_eq!(d.value(), Some(5));
    }

    #[test]
    fn subset_and_disjoint() {
        let d = Domain::range(2, 4);
        assert!(d.subset_of_range(0, 10));
        assert!(!d.subset_of_range(3, 10));
        assert!(d.disjoint_from_range(10, 20));
        assert!(!d.disjoint_from_range(4, 20));
    }
}
