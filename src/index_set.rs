/*
 * File: /src/index_set.rs
 * Created Date: Wednesday, March 5th 2025
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th March 2025 3:18:09 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

//! Index sets and their bipartitions.
//!
//! An [`IndexSet`] holds row or column positions in ascending order and is
//! never mutated once built: refining it yields two fresh sets.

/// Ascending set of row or column positions; the atom of a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    members: Vec<usize>,
}

impl IndexSet {
    /// The full range `0..n`.
    pub fn full(n: usize) -> Self {
        Self {
            members: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.members
    }

    /// Smallest member.
    pub fn first(&self) -> Option<usize> {
        self.members.first().copied()
    }

    /// Position of `index` within the ascending member order.
    pub fn position(&self, index: usize) -> Option<usize> {
        self.members.binary_search(&index).ok()
    }

    /// Splits the set by `select`: selected members go left, the rest right.
    /// Both halves keep ascending order.
    pub fn refine<F>(&self, mut select: F) -> Refinement
    where
        F: FnMut(usize) -> bool,
    {
        let (left, right): (Vec<usize>, Vec<usize>) =
            self.members.iter().partition(|&&i| select(i));
        Refinement {
            left: IndexSet { members: left },
            right: IndexSet { members: right },
        }
    }

    pub(crate) fn take_members(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.members)
    }
}

/// Ordered bipartition `(left, right)` of one index set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    left: IndexSet,
    right: IndexSet,
}

impl Refinement {
    pub fn left(&self) -> &IndexSet {
        &self.left
    }

    pub fn right(&self) -> &IndexSet {
        &self.right
    }

    /// A refinement is proper when neither side is empty.
    pub fn is_proper(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }

    pub fn into_parts(self) -> (IndexSet, IndexSet) {
        (self.left, self.right)
    }
}

/// For the ascending merge of two disjoint sets, marks which positions came
/// from `left`. This recovers the parent's member layout after a split.
pub(crate) fn selection_mask(left: &IndexSet, right: &IndexSet) -> Vec<bool> {
    let mut mask = Vec::with_capacity(left.len() + right.len());
    let (mut l, mut r) = (left.iter().peekable(), right.iter().peekable());
    loop {
        match (l.peek(), r.peek()) {
            (Some(&&a), Some(&&b)) => {
                debug_assert_ne!(a, b, "refinement halves must be disjoint");
                if a < b {
                    mask.push(true);
                    l.next();
                } else {
                    mask.push(false);
                    r.next();
                }
            }
            (Some(_), None) => {
                mask.push(true);
                l.next();
            }
            (None, Some(_)) => {
                mask.push(false);
                r.next();
            }
            (None, None) => break,
        }
    }
    mask
}
