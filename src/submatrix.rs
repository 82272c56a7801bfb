/*
 * File: /src/submatrix.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Wednesday, 5th March 2025 10:21:37 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use ndarray::ArrayView2;
use std::ops::Index;

use crate::matrix::BinaryMatrix;

/// Borrowed view of `M[rows][cols]` for arbitrary index lists.
///
/// # Example
/// ```
/// use doubly_lexical::matrix::BinaryMatrix;
/// use doubly_lexical::submatrix::Submatrix;
/// let a = BinaryMatrix::from_rows(&[vec![1, 0, 1], vec![0, 1, 1], vec![1, 1, 0]]).unwrap();
/// let b = Submatrix::from_indices(&a, &[0, 2], &[1, 2]).unwrap();
///
/// assert_eq!(b[(0, 1)], 1);
/// assert_eq!(b.row_counts(), vec![1, 1]);
/// ```
/// b = [[0, 1],
///      [1, 0]]
pub struct Submatrix<'a> {
    data: ArrayView2<'a, u8>,
    row_indices: &'a [usize],
    col_indices: &'a [usize],
}

impl<'a> Submatrix<'a> {
    /// Returns `None` if any index falls outside the matrix.
    pub fn from_indices(
        matrix: &'a BinaryMatrix,
        row_indices: &'a [usize],
        col_indices: &'a [usize],
    ) -> Option<Self> {
        let n = matrix.dim();
        if row_indices.iter().chain(col_indices).any(|&i| i >= n) {
            return None;
        }

        Some(Submatrix {
            data: matrix.view(),
            row_indices,
            col_indices,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_indices.len(), self.col_indices.len())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&u8> {
        self.row_indices.get(row).and_then(|&r| {
            self.col_indices
                .get(col)
                .and_then(|&c| self.data.get((r, c)))
        })
    }

    /// Number of 1-entries in the `row`-th row of the view.
    pub fn row_ones(&self, row: usize) -> usize {
        let r = self.row_indices[row];
        self.col_indices
            .iter()
            .filter(|&&c| self.data[(r, c)] == 1)
            .count()
    }

    /// Per-row 1-counts, in the order of the row indices.
    pub fn row_counts(&self) -> Vec<usize> {
        (0..self.row_indices.len()).map(|i| self.row_ones(i)).collect()
    }
}

impl<'a> Index<(usize, usize)> for Submatrix<'a> {
    type Output = u8;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.get(index.0, index.1)
            .expect("submatrix index out of bounds")
    }
}

// impl Display
/// # Example
/// ```log
/// [0, 1]
/// [1, 0]
/// ```
impl<'a> std::fmt::Display for Submatrix<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.row_indices.len() {
            let row: Vec<String> = (0..self.col_indices.len())
                .map(|j| self[(i, j)].to_string())
                .collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}
