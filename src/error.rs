/*
 * File: /src/error.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::error::Error;
use std::fmt;

/// Errors raised while validating an input matrix.
///
/// Both kinds are detected eagerly, before any refinement work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The matrix is not square. For row-by-row input `cols` is the length of
    /// the first row that disagrees with the row count.
    InvalidDimension { rows: usize, cols: usize },
    /// An entry outside {0, 1}, reported at its first occurrence in row-major order.
    InvalidEntry { row: usize, col: usize, value: i64 },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderError::InvalidDimension { rows, cols } => {
                write!(f, "Matrix must be square, got {}x{}", rows, cols)
            }
            OrderError::InvalidEntry { row, col, value } => write!(
                f,
                "Entry ({}, {}) is {}, expected 0 or 1",
                row, col, value
            ),
        }
    }
}

impl Error for OrderError {}
