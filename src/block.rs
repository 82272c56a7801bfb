/*
 * File: /src/block.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Friday, 7th March 2025 5:40:12 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::fmt;

use crate::index_set::IndexSet;
use crate::matrix::BinaryMatrix;
use crate::partition::PartId;
use crate::submatrix::Submatrix;

/// Arena handle of a [`Block`] inside a [`BlockGrid`](crate::grid::BlockGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// One cell `B = (Ri, Cj)` of the block grid.
///
/// `row_sizes[k]` is the number of 1-entries of the `k`-th smallest row of
/// `Ri`, restricted to `Cj`; `size` is their sum.
#[derive(Debug, Clone)]
pub struct Block {
    rows: PartId,
    columns: PartId,
    height: usize,
    width: usize,
    size: usize,
    row_sizes: Vec<usize>,
    /// Next block of the same row strip.
    right: Option<BlockId>,
    /// Next block of the same column strip.
    below: Option<BlockId>,
    /// Successor in the processing chain.
    next: Option<BlockId>,
    /// Predecessor in the processing chain.
    previous: Option<BlockId>,
}

impl Block {
    /// Builds a block by scanning `M[row_set][column_set]` once.
    pub fn scan(
        matrix: &BinaryMatrix,
        rows: PartId,
        row_set: &IndexSet,
        columns: PartId,
        column_set: &IndexSet,
    ) -> Block {
        let row_sizes = Submatrix::from_indices(matrix, row_set.as_slice(), column_set.as_slice())
            .expect("partition members lie inside the matrix")
            .row_counts();
        Block::from_row_sizes(rows, columns, column_set.len(), row_sizes)
    }

    fn from_row_sizes(
        rows: PartId,
        columns: PartId,
        width: usize,
        row_sizes: Vec<usize>,
    ) -> Block {
        Block {
            rows,
            columns,
            height: row_sizes.len(),
            width,
            size: row_sizes.iter().sum(),
            row_sizes,
            right: None,
            below: None,
            next: None,
            previous: None,
        }
    }

    pub fn rows(&self) -> PartId {
        self.rows
    }

    pub fn columns(&self) -> PartId {
        self.columns
    }

    /// `|Ri|`
    pub fn height(&self) -> usize {
        self.height
    }

    /// `|Cj|`
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of 1-entries in the block.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row_sizes(&self) -> &[usize] {
        &self.row_sizes
    }

    /// 1-entries of `row` inside the block, or `None` if `row` is not in `row_set`.
    pub fn row_size(&self, row_set: &IndexSet, row: usize) -> Option<usize> {
        row_set.position(row).map(|k| self.row_sizes[k])
    }

    pub fn is_constant(&self) -> bool {
        self.size == 0 || self.is_full()
    }

    fn is_full(&self) -> bool {
        self.size == self.height * self.width
    }

    /// Smallest row whose restriction to the block is neither all-0 nor all-1.
    pub fn splitting_row(&self, row_set: &IndexSet) -> Option<usize> {
        self.row_sizes
            .iter()
            .position(|&s| s > 0 && s < self.width)
            .map(|k| row_set.as_slice()[k])
    }

    pub fn right(&self) -> Option<BlockId> {
        self.right
    }

    pub fn below(&self) -> Option<BlockId> {
        self.below
    }

    pub fn next(&self) -> Option<BlockId> {
        self.next
    }

    pub fn previous(&self) -> Option<BlockId> {
        self.previous
    }

    pub fn set_right(&mut self, right: Option<BlockId>) {
        self.right = right;
    }

    pub fn set_below(&mut self, below: Option<BlockId>) {
        self.below = below;
    }

    pub fn set_next(&mut self, next: Option<BlockId>) {
        self.next = next;
    }

    pub fn set_previous(&mut self, previous: Option<BlockId>) {
        self.previous = previous;
    }

    /// Narrows this block to the `left` columns and returns the block over the
    /// `right` columns. Links of the returned block are unset.
    ///
    /// Constant blocks split without touching the matrix; otherwise only the
    /// smaller half is scanned and the other half's counts are derived.
    pub(crate) fn split_columns(
        &mut self,
        matrix: &BinaryMatrix,
        row_set: &IndexSet,
        left: (PartId, &IndexSet),
        right: (PartId, &IndexSet),
    ) -> Block {
        let (left_id, left_set) = left;
        let (right_id, right_set) = right;
        debug_assert_eq!(left_set.len() + right_set.len(), self.width);
        debug_assert_eq!(row_set.len(), self.height);

        let (left_sizes, right_sizes): (Vec<usize>, Vec<usize>) = if self.size == 0 {
            (vec![0; self.height], vec![0; self.height])
        } else if self.is_full() {
            (
                vec![left_set.len(); self.height],
                vec![right_set.len(); self.height],
            )
        } else {
            let scan_left = left_set.len() <= right_set.len();
            let scanned = if scan_left { left_set } else { right_set };
            row_set
                .iter()
                .zip(&self.row_sizes)
                .map(|(&r, &total)| {
                    let ones = scanned.iter().filter(|&&c| matrix.is_set(r, c)).count();
                    if scan_left {
                        (ones, total - ones)
                    } else {
                        (total - ones, ones)
                    }
                })
                .unzip()
        };

        self.columns = left_id;
        self.width = left_set.len();
        self.size = left_sizes.iter().sum();
        self.row_sizes = left_sizes;

        Block::from_row_sizes(self.rows, right_id, right_set.len(), right_sizes)
    }

    /// Narrows this block to the rows selected by `mask` (indexed like
    /// `row_sizes`) and returns the block over the remaining rows. Links of the
    /// returned block are unset.
    pub(crate) fn split_rows(&mut self, mask: &[bool], top: PartId, bottom: PartId) -> Block {
        debug_assert_eq!(mask.len(), self.height);
        let mut top_sizes = Vec::new();
        let mut bottom_sizes = Vec::new();
        for (&s, &selected) in self.row_sizes.iter().zip(mask) {
            if selected {
                top_sizes.push(s);
            } else {
                bottom_sizes.push(s);
            }
        }

        self.rows = top;
        self.height = top_sizes.len();
        self.size = top_sizes.iter().sum();
        self.row_sizes = top_sizes;

        Block::from_row_sizes(bottom, self.columns, self.width, bottom_sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_set::selection_mask;
    use crate::partition::Partition;

    fn sample() -> BinaryMatrix {
        BinaryMatrix::from_rows(&[
            vec![1, 0, 1, 1],
            vec![0, 0, 1, 0],
            vec![1, 0, 0, 1],
            vec![0, 0, 1, 1],
        ])
        .unwrap()
    }

    fn whole(matrix: &BinaryMatrix) -> (Partition, Partition, Block) {
        let rows = Partition::new(matrix.dim());
        let columns = Partition::new(matrix.dim());
        let block = Block::scan(
            matrix,
            rows.first(),
            rows.part(rows.first()),
            columns.first(),
            columns.part(columns.first()),
        );
        (rows, columns, block)
    }

    #[test]
    fn test_scan_counts() {
        let matrix = sample();
        let (rows, _, block) = whole(&matrix);
        assert_eq!(block.size(), 8);
        assert_eq!(block.row_sizes(), &[3, 1, 2, 2]);
        assert_eq!(block.row_size(rows.part(rows.first()), 2), Some(2));
        assert_eq!(block.row_size(rows.part(rows.first()), 9), None);
        assert_eq!((block.height(), block.width()), (4, 4));
        assert!(!block.is_constant());
        assert_eq!(block.next(), None);
    }

    #[test]
    fn test_constant_blocks() {
        let zeros = BinaryMatrix::from_rows(&[vec![0, 0], vec![0, 0]]).unwrap();
        assert!(whole(&zeros).2.is_constant());
        let ones = BinaryMatrix::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        assert!(whole(&ones).2.is_constant());
        let empty = BinaryMatrix::from_rows::<u8>(&[]).unwrap();
        assert!(whole(&empty).2.is_constant());
    }

    #[test]
    fn test_splitting_row() {
        let matrix = sample();
        let (rows, _, block) = whole(&matrix);
        assert_eq!(block.splitting_row(rows.part(rows.first())), Some(0));

        let uniform = BinaryMatrix::from_rows(&[vec![1, 1], vec![0, 0]]).unwrap();
        let (rows, _, block) = whole(&uniform);
        assert!(!block.is_constant());
        assert_eq!(block.splitting_row(rows.part(rows.first())), None);
    }

    #[test]
    fn test_split_columns_matches_rescan() {
        let matrix = sample();
        let (rows, mut columns, mut block) = whole(&matrix);
        let root = columns.first();
        // pivot row 0 selects columns {0, 2, 3}
        let refinement = columns.part(root).refine(|c| matrix.is_set(0, c));
        let (left, right) = columns.replace(root, refinement);
        let row_set = rows.part(rows.first());
        let right_block = block.split_columns(
            &matrix,
            row_set,
            (left, columns.part(left)),
            (right, columns.part(right)),
        );

        let left_scan = Block::scan(&matrix, rows.first(), row_set, left, columns.part(left));
        assert_eq!(block.row_sizes(), left_scan.row_sizes());
        assert_eq!(block.size(), 8);
        assert_eq!(block.columns(), left);
        assert_eq!(block.width(), 3);
        assert_eq!(right_block.size(), 0);
        assert_eq!(right_block.columns(), right);
        assert!(right_block.is_constant());
    }

    #[test]
    fn test_split_rows_redistributes_counts() {
        let matrix = BinaryMatrix::from_rows(&[
            vec![1, 1, 0],
            vec![0, 0, 1],
            vec![1, 1, 1],
        ])
        .unwrap();
        let (mut rows, _, mut block) = whole(&matrix);
        let root = rows.first();
        let refinement = rows.part(root).refine(|r| matrix.is_set(r, 0));
        let (top, bottom) = rows.replace(root, refinement);
        let mask = selection_mask(rows.part(top), rows.part(bottom));
        let bottom_block = block.split_rows(&mask, top, bottom);

        assert_eq!(block.rows(), top);
        assert_eq!(block.row_sizes(), &[2, 3]);
        assert_eq!(block.size(), 5);
        assert_eq!(bottom_block.rows(), bottom);
        assert_eq!(bottom_block.row_sizes(), &[1]);
        assert_eq!(bottom_block.width(), 3);
    }
}
