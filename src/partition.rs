/*
 * File: /src/partition.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::fmt;

use crate::index_set::{IndexSet, Refinement};

/// Stable handle to one part of a [`Partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl PartId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Ordered partition of `0..n` into disjoint index sets.
///
/// Parts are stored in an arena and addressed by [`PartId`]; `order` lists the
/// live parts in output order. Replacing a part releases its members and
/// appends the two children to the arena.
#[derive(Debug, Clone)]
pub struct Partition {
    parts: Vec<IndexSet>,
    order: Vec<PartId>,
    size: usize,
}

impl Partition {
    /// A partition with the single part `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            parts: vec![IndexSet::full(n)],
            order: vec![PartId(0)],
            size: n,
        }
    }

    /// Number of live parts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of indices covered, i.e. `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Live part ids in output order.
    pub fn ids(&self) -> &[PartId] {
        &self.order
    }

    pub fn first(&self) -> PartId {
        self.order[0]
    }

    pub fn part(&self, id: PartId) -> &IndexSet {
        &self.parts[id.0]
    }

    /// Live parts in output order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexSet> + '_ {
        self.order.iter().map(move |&id| &self.parts[id.0])
    }

    /// Replaces `id` by `[left, right]` at the same position and returns the
    /// ids of the two new parts.
    ///
    /// # Panics
    /// If `id` is not a live part or `refinement` is not proper; both indicate
    /// a broken caller invariant.
    pub fn replace(&mut self, id: PartId, refinement: Refinement) -> (PartId, PartId) {
        assert!(refinement.is_proper(), "refinement of {} must be proper", id);
        let position = self
            .order
            .iter()
            .position(|&p| p == id)
            .unwrap_or_else(|| panic!("{} is not a live part", id));
        debug_assert_eq!(
            refinement.left().len() + refinement.right().len(),
            self.parts[id.0].len(),
            "refinement of {} must cover the part exactly",
            id
        );

        let (left, right) = refinement.into_parts();
        let left_id = PartId(self.parts.len());
        let right_id = PartId(self.parts.len() + 1);
        self.parts.push(left);
        self.parts.push(right);
        self.parts[id.0].take_members();
        self.order[position] = left_id;
        self.order.insert(position + 1, right_id);

        (left_id, right_id)
    }

    /// All indices, part by part in order, ascending within a part.
    pub fn flatten(&self) -> Vec<usize> {
        self.iter().flat_map(|part| part.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_partition() {
        let partition = Partition::new(5);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.size(), 5);
        assert_eq!(partition.flatten(), vec![0, 1, 2, 3, 4]);
        assert_eq!(partition.part(partition.first()).len(), 5);
    }

    #[test]
    fn test_replace_in_place() {
        let mut partition = Partition::new(6);
        let root = partition.first();
        let refinement = partition.part(root).refine(|i| i >= 4);
        let (left, right) = partition.replace(root, refinement);
        assert_eq!(partition.ids(), &[left, right]);
        assert_eq!(partition.flatten(), vec![4, 5, 0, 1, 2, 3]);

        // split the trailing part, the leading one must keep its position
        let refinement = partition.part(right).refine(|i| i % 2 == 1);
        let (odd, even) = partition.replace(right, refinement);
        assert_eq!(partition.ids(), &[left, odd, even]);
        assert_eq!(partition.flatten(), vec![4, 5, 1, 3, 0, 2]);
        assert!(partition.part(right).is_empty());
        assert_eq!(even.index(), 4);
    }

    #[test]
    #[should_panic(expected = "must be proper")]
    fn test_replace_rejects_improper() {
        let mut partition = Partition::new(3);
        let root = partition.first();
        let refinement = partition.part(root).refine(|_| true);
        partition.replace(root, refinement);
    }

    #[test]
    #[should_panic(expected = "is not a live part")]
    fn test_replace_rejects_retired_part() {
        let mut partition = Partition::new(4);
        let root = partition.first();
        let refinement = partition.part(root).refine(|i| i < 2);
        partition.replace(root, refinement.clone());
        partition.replace(root, refinement);
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::new(0);
        assert_eq!(partition.len(), 1);
        assert!(partition.flatten().is_empty());
    }
}
