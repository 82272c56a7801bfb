/*
 * File: /src/builder.rs
 * Created Date: Friday, March 7th 2025
 * Author: Zihan
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use ndarray::{Array2, Axis};

use crate::matrix::BinaryMatrix;
use crate::partition::Partition;

/// Reads the final partitions of a run and materializes the permuted matrix.
pub struct MatrixBuilder<'a> {
    matrix: &'a BinaryMatrix,
    rows: &'a Partition,
    columns: &'a Partition,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(matrix: &'a BinaryMatrix, rows: &'a Partition, columns: &'a Partition) -> Self {
        debug_assert_eq!(rows.size(), matrix.dim());
        debug_assert_eq!(columns.size(), matrix.dim());
        MatrixBuilder {
            matrix,
            rows,
            columns,
        }
    }

    /// Row permutation: parts in order, members ascending within each part.
    pub fn ordered_rows(&self) -> Vec<usize> {
        self.rows.flatten()
    }

    pub fn ordered_columns(&self) -> Vec<usize> {
        self.columns.flatten()
    }

    /// `output[i][j] = M[rows[i]][cols[j]]`.
    pub fn build_ordered_matrix(&self, rows: &[usize], columns: &[usize]) -> Array2<u8> {
        self.matrix
            .view()
            .select(Axis(0), rows)
            .select(Axis(1), columns)
    }
}
