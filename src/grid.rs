/*
 * File: /src/grid.rs
 * Created Date: Wednesday, March 5th 2025
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 8th March 2025 11:02:45 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

//! The block grid: an arena of [`Block`]s linked in four directions.
//!
//! `right`/`below` follow the row and column partitions; `next`/`previous`
//! thread every block into one row-major chain. A split keeps the parent's
//! slot for the left (or top) child and appends one block for the other
//! child, so the head of the chain is always the first block.

use std::ops::Index;

use log::trace;

use crate::block::{Block, BlockId};
use crate::index_set::selection_mask;
use crate::matrix::BinaryMatrix;
use crate::partition::{PartId, Partition};
use crate::submatrix::Submatrix;

#[derive(Debug, Clone)]
pub struct BlockGrid {
    blocks: Vec<Block>,
    head: Option<BlockId>,
    /// Leftmost block of every row strip, indexed by row [`PartId`].
    row_heads: Vec<Option<BlockId>>,
    /// Topmost block of every column strip, indexed by column [`PartId`].
    column_heads: Vec<Option<BlockId>>,
}

fn set_head(heads: &mut Vec<Option<BlockId>>, part: PartId, block: Option<BlockId>) {
    if heads.len() <= part.index() {
        heads.resize(part.index() + 1, None);
    }
    heads[part.index()] = block;
}

impl BlockGrid {
    /// A grid with the single block `(R, C)` of two fresh partitions.
    pub fn new(matrix: &BinaryMatrix, rows: &Partition, columns: &Partition) -> Self {
        assert!(
            rows.len() == 1 && columns.len() == 1,
            "the grid starts from single-part partitions"
        );
        let (r, c) = (rows.first(), columns.first());
        let block = Block::scan(matrix, r, rows.part(r), c, columns.part(c));

        let mut grid = BlockGrid {
            blocks: vec![block],
            head: Some(BlockId(0)),
            row_heads: Vec::new(),
            column_heads: Vec::new(),
        };
        set_head(&mut grid.row_heads, r, grid.head);
        set_head(&mut grid.column_heads, c, grid.head);
        grid
    }

    /// First block of the processing chain.
    pub fn head(&self) -> Option<BlockId> {
        self.head
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn row_head(&self, part: PartId) -> Option<BlockId> {
        self.row_heads.get(part.index()).copied().flatten()
    }

    pub fn column_head(&self, part: PartId) -> Option<BlockId> {
        self.column_heads.get(part.index()).copied().flatten()
    }

    /// Blocks in chain order.
    pub fn chain(&self) -> ChainIter<'_> {
        ChainIter {
            grid: self,
            cursor: self.head,
        }
    }

    fn push(&mut self, block: Block) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(block);
        id
    }

    /// Applies the column split `parent -> [left, right]` to every block of
    /// the column strip of `parent`, top to bottom.
    ///
    /// Each parent block keeps its slot as the left child; its right child is
    /// linked `right` of it and inserted directly after it in the chain.
    pub fn split_column_strip(
        &mut self,
        matrix: &BinaryMatrix,
        rows: &Partition,
        columns: &Partition,
        parent: PartId,
        left: PartId,
        right: PartId,
    ) {
        let top = self
            .column_head(parent)
            .unwrap_or_else(|| panic!("column strip {} has no blocks", parent));
        let left_set = columns.part(left);
        let right_set = columns.part(right);

        let mut cursor = Some(top);
        let mut above: Option<BlockId> = None;
        let mut top_right = None;
        while let Some(x) = cursor {
            let row_set = rows.part(self.blocks[x.0].rows());
            let mut y_block = self.blocks[x.0].split_columns(
                matrix,
                row_set,
                (left, left_set),
                (right, right_set),
            );
            let x_block = &self.blocks[x.0];
            let successor = x_block.next();
            y_block.set_right(x_block.right());
            y_block.set_next(successor);
            y_block.set_previous(Some(x));
            cursor = x_block.below();

            let y = self.push(y_block);
            if let Some(n) = successor {
                self.blocks[n.0].set_previous(Some(y));
            }
            let x_block = &mut self.blocks[x.0];
            x_block.set_right(Some(y));
            x_block.set_next(Some(y));

            match above {
                Some(a) => self.blocks[a.0].set_below(Some(y)),
                None => top_right = Some(y),
            }
            above = Some(y);
            trace!("column split of {} appended {}", x, y);
        }

        set_head(&mut self.column_heads, parent, None);
        set_head(&mut self.column_heads, left, Some(top));
        set_head(&mut self.column_heads, right, top_right);
    }

    /// Applies the row split `parent -> [top, bottom]` to every block of the
    /// row strip of `parent`, left to right.
    ///
    /// Each parent block keeps its slot as the top child; the bottom children
    /// form a new row strip whose blocks are spliced into the chain, in order,
    /// right after the last top child.
    pub fn split_row_strip(&mut self, rows: &Partition, parent: PartId, top: PartId, bottom: PartId) {
        let first = self
            .row_head(parent)
            .unwrap_or_else(|| panic!("row strip {} has no blocks", parent));
        let mask = selection_mask(rows.part(top), rows.part(bottom));

        let mut cursor = Some(first);
        let mut last_top = first;
        let mut strip: Vec<BlockId> = Vec::new();
        while let Some(x) = cursor {
            let mut y_block = self.blocks[x.0].split_rows(&mask, top, bottom);
            let x_block = &self.blocks[x.0];
            y_block.set_below(x_block.below());
            cursor = x_block.right();
            last_top = x;

            let y = self.push(y_block);
            self.blocks[x.0].set_below(Some(y));
            if let Some(&left) = strip.last() {
                self.blocks[left.0].set_right(Some(y));
            }
            strip.push(y);
            trace!("row split of {} appended {}", x, y);
        }

        let after = self.blocks[last_top.0].next();
        let mut previous = last_top;
        for &y in &strip {
            self.blocks[previous.0].set_next(Some(y));
            self.blocks[y.0].set_previous(Some(previous));
            previous = y;
        }
        self.blocks[previous.0].set_next(after);
        if let Some(a) = after {
            self.blocks[a.0].set_previous(Some(previous));
        }

        set_head(&mut self.row_heads, parent, None);
        set_head(&mut self.row_heads, top, Some(first));
        set_head(&mut self.row_heads, bottom, strip.first().copied());
    }

    /// Verifies every grid invariant against the partitions and the matrix.
    ///
    /// # Panics
    /// On the first violated invariant. Counts are recomputed by a full scan,
    /// so this costs `O(n^2)` per call.
    pub fn check_consistency(&self, matrix: &BinaryMatrix, rows: &Partition, columns: &Partition) {
        assert_eq!(
            self.blocks.len(),
            rows.len() * columns.len(),
            "blocks must tile the matrix exactly once"
        );

        let mut expected_chain: Vec<BlockId> = Vec::with_capacity(self.blocks.len());
        let row_ids = rows.ids();
        let column_ids = columns.ids();
        for (i, &r) in row_ids.iter().enumerate() {
            let mut cursor = self.row_head(r);
            for (j, &c) in column_ids.iter().enumerate() {
                let id = cursor.unwrap_or_else(|| panic!("row strip {} ends before column {}", r, c));
                let block = self.block(id);
                assert_eq!(block.rows(), r, "{} has the wrong row part", id);
                assert_eq!(block.columns(), c, "{} has the wrong column part", id);
                if i == 0 {
                    assert_eq!(self.column_head(c), Some(id), "column head of {} is stale", c);
                }

                let below = block.below().map(|b| self.block(b));
                match row_ids.get(i + 1) {
                    Some(&next_row) => {
                        let below = below.unwrap_or_else(|| panic!("{} lost its below link", id));
                        assert_eq!(below.rows(), next_row, "{} links below to the wrong strip", id);
                        assert_eq!(below.columns(), c, "{} links below across strips", id);
                    }
                    None => assert!(below.is_none(), "{} is in the last strip but links below", id),
                }
                if j + 1 == column_ids.len() {
                    assert!(block.right().is_none(), "{} is rightmost but links right", id);
                }

                let row_set = rows.part(r);
                let column_set = columns.part(c);
                let view = Submatrix::from_indices(matrix, row_set.as_slice(), column_set.as_slice())
                    .expect("partition members lie inside the matrix");
                assert_eq!((block.height(), block.width()), view.shape(), "{} has a stale shape", id);
                let recount = view.row_counts();
                assert_eq!(block.row_sizes(), recount.as_slice(), "{} has stale row sizes", id);
                assert_eq!(block.size(), recount.iter().sum::<usize>(), "{} has a stale size", id);

                expected_chain.push(id);
                cursor = block.right();
            }
        }

        assert_eq!(self.head, expected_chain.first().copied(), "chain head is not the top-left block");
        for (k, &id) in expected_chain.iter().enumerate() {
            let block = self.block(id);
            let previous = k.checked_sub(1).map(|p| expected_chain[p]);
            assert_eq!(block.previous(), previous, "{} has a wrong previous link", id);
            assert_eq!(block.next(), expected_chain.get(k + 1).copied(), "{} has a wrong next link", id);
        }
    }
}

impl Index<BlockId> for BlockGrid {
    type Output = Block;

    fn index(&self, id: BlockId) -> &Self::Output {
        &self.blocks[id.0]
    }
}

/// Iterator over the processing chain.
pub struct ChainIter<'a> {
    grid: &'a BlockGrid,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let block = self.grid.block(id);
        self.cursor = block.next();
        Some((id, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinaryMatrix {
        BinaryMatrix::from_rows(&[
            vec![1, 0, 1, 1],
            vec![0, 0, 1, 0],
            vec![1, 0, 0, 1],
            vec![0, 0, 1, 1],
        ])
        .unwrap()
    }

    fn refine_columns(
        grid: &mut BlockGrid,
        matrix: &BinaryMatrix,
        rows: &Partition,
        columns: &mut Partition,
        part: PartId,
        pivot_row: usize,
    ) -> (PartId, PartId) {
        let refinement = columns.part(part).refine(|c| matrix.is_set(pivot_row, c));
        let (left, right) = columns.replace(part, refinement);
        grid.split_column_strip(matrix, rows, columns, part, left, right);
        (left, right)
    }

    fn refine_rows(
        grid: &mut BlockGrid,
        matrix: &BinaryMatrix,
        rows: &mut Partition,
        part: PartId,
        pivot_column: usize,
    ) -> (PartId, PartId) {
        let refinement = rows.part(part).refine(|r| matrix.is_set(r, pivot_column));
        let (top, bottom) = rows.replace(part, refinement);
        grid.split_row_strip(rows, part, top, bottom);
        (top, bottom)
    }

    #[test]
    fn test_new_grid() {
        let matrix = sample();
        let rows = Partition::new(4);
        let columns = Partition::new(4);
        let grid = BlockGrid::new(&matrix, &rows, &columns);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.head(), Some(BlockId(0)));
        assert_eq!(grid[BlockId(0)].size(), 8);
        grid.check_consistency(&matrix, &rows, &columns);
    }

    #[test]
    fn test_column_then_row_splits_stay_consistent() {
        let matrix = sample();
        let mut rows = Partition::new(4);
        let mut columns = Partition::new(4);
        let mut grid = BlockGrid::new(&matrix, &rows, &columns);

        let root = columns.first();
        let (left, right) = refine_columns(&mut grid, &matrix, &rows, &mut columns, root, 0);
        grid.check_consistency(&matrix, &rows, &columns);
        assert_eq!(columns.part(left).as_slice(), &[0, 2, 3]);
        assert_eq!(columns.part(right).as_slice(), &[1]);

        let root = rows.first();
        let (top, bottom) = refine_rows(&mut grid, &matrix, &mut rows, root, 2);
        grid.check_consistency(&matrix, &rows, &columns);
        assert_eq!(rows.part(top).as_slice(), &[0, 1, 3]);
        assert_eq!(rows.part(bottom).as_slice(), &[2]);

        // splitting the left strip now touches two row strips
        refine_columns(&mut grid, &matrix, &rows, &mut columns, left, 1);
        grid.check_consistency(&matrix, &rows, &columns);
        assert_eq!(grid.len(), 6);
        assert_eq!(columns.flatten(), vec![2, 0, 3, 1]);

        // and splitting a row strip of three blocks
        refine_rows(&mut grid, &matrix, &mut rows, top, 0);
        grid.check_consistency(&matrix, &rows, &columns);
        assert_eq!(grid.len(), 9);
        assert_eq!(rows.flatten(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_chain_is_row_major() {
        let matrix = sample();
        let mut rows = Partition::new(4);
        let mut columns = Partition::new(4);
        let mut grid = BlockGrid::new(&matrix, &rows, &columns);
        let (column_root, row_root) = (columns.first(), rows.first());
        refine_columns(&mut grid, &matrix, &rows, &mut columns, column_root, 0);
        refine_rows(&mut grid, &matrix, &mut rows, row_root, 0);

        let order: Vec<(PartId, PartId)> = grid
            .chain()
            .map(|(_, block)| (block.rows(), block.columns()))
            .collect();
        let mut expected = Vec::new();
        for &r in rows.ids() {
            for &c in columns.ids() {
                expected.push((r, c));
            }
        }
        assert_eq!(order, expected);
    }

    #[test]
    #[should_panic(expected = "tile the matrix")]
    fn test_consistency_detects_partition_drift() {
        let matrix = sample();
        let rows = Partition::new(4);
        let mut columns = Partition::new(4);
        let grid = BlockGrid::new(&matrix, &rows, &columns);
        let root = columns.first();
        let refinement = columns.part(root).refine(|c| c < 2);
        columns.replace(root, refinement);
        grid.check_consistency(&matrix, &rows, &columns);
    }
}
