/*
 * File: /src/lib.rs
 * Created Date: Monday, January 22nd 2024
 * Author: Zihan
 * -----
 * Last Modified: Monday, 10th March 2025 9:40:12 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2025-03-10		Zihan	doubly lexical ordering by partition refinement
 */
#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod block;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod harness;
pub mod index_set;
pub mod matrix;
pub mod partition;
pub mod submatrix;
pub mod util;

use log::info;
use ndarray::Array2;
use rayon::prelude::*;

pub use builder::MatrixBuilder;
pub use engine::{OrderConfig, RefinementEngine, RefinementStats};
pub use error::OrderError;
pub use matrix::BinaryMatrix;

/// A doubly lexical ordering of one matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedResult {
    /// `ordered_matrix[i][j] == M[ordered_rows[i]][ordered_columns[j]]`
    pub ordered_matrix: Array2<u8>,
    pub ordered_rows: Vec<usize>,
    pub ordered_columns: Vec<usize>,
    pub stats: RefinementStats,
}

/// Validates `data` and orders it with the default configuration.
///
/// # Example
/// ```
/// use ndarray::array;
/// let result = doubly_lexical::order(&array![[0i64, 1], [1, 1]]).unwrap();
/// assert_eq!(result.ordered_matrix, array![[1u8, 1], [1, 0]]);
/// assert_eq!(result.ordered_rows, vec![1, 0]);
/// ```
pub fn order<T>(data: &Array2<T>) -> Result<OrderedResult, OrderError>
where
    T: Copy + Into<i64>,
{
    let matrix = BinaryMatrix::new(data)?;
    Ok(order_matrix(&matrix, &OrderConfig::default()))
}

pub fn order_matrix(matrix: &BinaryMatrix, config: &OrderConfig) -> OrderedResult {
    let refined = RefinementEngine::new(matrix, *config).run();
    let builder = MatrixBuilder::new(matrix, &refined.rows, &refined.columns);
    let ordered_rows = builder.ordered_rows();
    let ordered_columns = builder.ordered_columns();
    let ordered_matrix = builder.build_ordered_matrix(&ordered_rows, &ordered_columns);

    info!(
        "Ordered {}x{} matrix with {} ones: {} column and {} row refinements, {} blocks",
        matrix.dim(),
        matrix.dim(),
        matrix.count_ones(),
        refined.stats.column_refinements,
        refined.stats.row_refinements,
        refined.stats.blocks
    );

    OrderedResult {
        ordered_matrix,
        ordered_rows,
        ordered_columns,
        stats: refined.stats,
    }
}

/// Orders independent matrices in parallel; results keep the input order.
pub fn order_all(matrices: &[BinaryMatrix], config: &OrderConfig) -> Vec<OrderedResult> {
    matrices
        .par_iter()
        .map(|matrix| order_matrix(matrix, config))
        .collect()
}
