/*
 * File: /src/engine.rs
 * Created Date: Thursday, March 6th 2025
 * Author: Zihan
 * -----
 * Last Modified: Monday, 10th March 2025 9:14:50 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2025-03-10		Zihan	smallest-index pivots on both dimensions
 */

//! Partition refinement driver.
//!
//! The engine walks the block chain. A constant block is skipped; a
//! non-constant block is refined, either along its columns (when some row of
//! the block is mixed) or along its rows (when every row is uniform), and the
//! walk resumes at the same slot, which now holds the first child.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::grid::BlockGrid;
use crate::matrix::BinaryMatrix;
use crate::partition::Partition;

/// Knobs of one ordering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Re-verify the whole grid after every refinement. Quadratic per step;
    /// meant for tests and debugging.
    pub check_invariants: bool,
}

impl OrderConfig {
    pub fn with_invariant_checks() -> Self {
        OrderConfig {
            check_invariants: true,
        }
    }
}

/// Counters collected while refining.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementStats {
    pub column_refinements: usize,
    pub row_refinements: usize,
    /// Number of times the engine looked at a block.
    pub scan_steps: usize,
    pub row_parts: usize,
    pub column_parts: usize,
    pub blocks: usize,
}

impl RefinementStats {
    pub fn refinements(&self) -> usize {
        self.column_refinements + self.row_refinements
    }
}

/// The index a refinement splits by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// A mixed row: its 1-columns go left.
    Row(usize),
    /// A column of a block with uniform rows: the rows with a 1 go on top.
    Column(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Scanning(BlockId),
    Refining(BlockId, Pivot),
    Finished,
}

/// Final partitions of a finished run.
#[derive(Debug, Clone)]
pub struct Refined {
    pub rows: Partition,
    pub columns: Partition,
    pub stats: RefinementStats,
}

pub struct RefinementEngine<'m> {
    matrix: &'m BinaryMatrix,
    config: OrderConfig,
    rows: Partition,
    columns: Partition,
    grid: BlockGrid,
    state: EngineState,
    stats: RefinementStats,
}

impl<'m> RefinementEngine<'m> {
    /// Starts in `Scanning` at the single block covering the matrix.
    pub fn new(matrix: &'m BinaryMatrix, config: OrderConfig) -> Self {
        let n = matrix.dim();
        let rows = Partition::new(n);
        let columns = Partition::new(n);
        let grid = BlockGrid::new(matrix, &rows, &columns);
        let state = match grid.head() {
            Some(head) => EngineState::Scanning(head),
            None => EngineState::Finished,
        };

        RefinementEngine {
            matrix,
            config,
            rows,
            columns,
            grid,
            state,
            stats: RefinementStats::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn rows(&self) -> &Partition {
        &self.rows
    }

    pub fn columns(&self) -> &Partition {
        &self.columns
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Finished
    }

    /// Performs one transition and returns the new state.
    pub fn step(&mut self) -> EngineState {
        self.state = match self.state {
            EngineState::Scanning(id) => self.scan(id),
            EngineState::Refining(id, Pivot::Row(row)) => {
                self.refine_columns(id, row);
                EngineState::Scanning(id)
            }
            EngineState::Refining(id, Pivot::Column(column)) => {
                self.refine_rows(id, column);
                EngineState::Scanning(id)
            }
            EngineState::Finished => EngineState::Finished,
        };
        self.state
    }

    /// Steps until the chain is exhausted.
    pub fn run(mut self) -> Refined {
        while !self.is_finished() {
            self.step();
        }

        let mut stats = self.stats;
        stats.row_parts = self.rows.len();
        stats.column_parts = self.columns.len();
        stats.blocks = self.grid.len();
        Refined {
            rows: self.rows,
            columns: self.columns,
            stats,
        }
    }

    fn scan(&mut self, id: BlockId) -> EngineState {
        self.stats.scan_steps += 1;
        let block = self.grid.block(id);
        if block.is_constant() {
            trace!("{} is constant (size {})", id, block.size());
            return match block.next() {
                Some(next) => EngineState::Scanning(next),
                None => EngineState::Finished,
            };
        }

        let row_set = self.rows.part(block.rows());
        match block.splitting_row(row_set) {
            Some(row) => EngineState::Refining(id, Pivot::Row(row)),
            None => {
                let column = self
                    .columns
                    .part(block.columns())
                    .first()
                    .expect("a non-constant block has columns");
                EngineState::Refining(id, Pivot::Column(column))
            }
        }
    }

    fn refine_columns(&mut self, id: BlockId, row: usize) {
        let parent = self.grid.block(id).columns();
        let matrix = self.matrix;
        let refinement = self.columns.part(parent).refine(|c| matrix.is_set(row, c));
        debug!(
            "{}: column split of {} by row {} into {} + {}",
            id,
            parent,
            row,
            refinement.left().len(),
            refinement.right().len()
        );

        let (left, right) = self.columns.replace(parent, refinement);
        self.grid
            .split_column_strip(matrix, &self.rows, &self.columns, parent, left, right);
        self.stats.column_refinements += 1;
        self.verify();
    }

    fn refine_rows(&mut self, id: BlockId, column: usize) {
        let parent = self.grid.block(id).rows();
        let matrix = self.matrix;
        let refinement = self.rows.part(parent).refine(|r| matrix.is_set(r, column));
        debug!(
            "{}: row split of {} by column {} into {} + {}",
            id,
            parent,
            column,
            refinement.left().len(),
            refinement.right().len()
        );

        let (top, bottom) = self.rows.replace(parent, refinement);
        self.grid.split_row_strip(&self.rows, parent, top, bottom);
        self.stats.row_refinements += 1;
        self.verify();
    }

    fn verify(&self) {
        if self.config.check_invariants {
            self.grid
                .check_consistency(self.matrix, &self.rows, &self.columns);
        }
    }
}
