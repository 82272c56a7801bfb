/*
 * File: /matrix.rs
 * Created Date: Tuesday, March 4th 2025
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th March 2025 3:12:08 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use std::ops::Index;

use ndarray::{Array2, ArrayView2};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::error::OrderError;

/// A square (0,1)-matrix, validated once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    data: Array2<u8>,
}

impl BinaryMatrix {
    /// Validates `data` and converts it into a binary matrix.
    ///
    /// Fails with [`OrderError::InvalidDimension`] if `data` is not square and
    /// with [`OrderError::InvalidEntry`] on the first entry outside {0, 1}.
    pub fn new<T>(data: &Array2<T>) -> Result<BinaryMatrix, OrderError>
    where
        T: Copy + Into<i64>,
    {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(OrderError::InvalidDimension { rows, cols });
        }

        if let Some(((row, col), value)) = data
            .indexed_iter()
            .map(|(index, &v)| (index, Into::<i64>::into(v)))
            .find(|&(_, v)| v != 0 && v != 1)
        {
            return Err(OrderError::InvalidEntry { row, col, value });
        }

        Ok(BinaryMatrix {
            data: data.mapv(|v| Into::<i64>::into(v) as u8),
        })
    }

    /// Builds a matrix from row vectors, rejecting ragged input.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<BinaryMatrix, OrderError>
    where
        T: Copy + Into<i64>,
    {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(OrderError::InvalidDimension {
                rows: n,
                cols: row.len(),
            });
        }

        let flat: Vec<T> = rows.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((n, n), flat)
            .expect("row lengths were checked against the row count");
        BinaryMatrix::new(&data)
    }

    /// Random n x n matrix where every entry is 1 with probability `density`.
    pub fn random_using<R: Rng + ?Sized>(n: usize, density: f64, rng: &mut R) -> BinaryMatrix {
        let samples: Array2<f64> = Array2::random_using((n, n), Uniform::new(0.0, 1.0), rng);
        BinaryMatrix {
            data: samples.mapv(|x| u8::from(x < density)),
        }
    }

    /// Number of rows (equal to the number of columns).
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `true` when `M[row][col] == 1`.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.data[(row, col)] == 1
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<u8> {
        self.data
    }

    /// Total number of 1-entries.
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }
}

impl Index<(usize, usize)> for BinaryMatrix {
    type Output = u8;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index]
    }
}
