/**
 * File: /src/util.rs
 * Created Date: Tuesday, June 18th 2024
 * Author: Zihan
 * -----
 * Last Modified: Friday, 7th March 2025 6:02:19 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2025-03-07		Zihan	ordering predicates replace the clustering helpers
**/
use std::cmp::Ordering;

use ndarray::{ArrayView2, Axis};

/// Every row is lexicographically `>=` the row below it, and every column is
/// lexicographically `>=` the column to its right.
pub fn is_doubly_lexical(matrix: ArrayView2<u8>) -> bool {
    lanes_non_increasing(matrix, Axis(0)) && lanes_non_increasing(matrix, Axis(1))
}

fn lanes_non_increasing(matrix: ArrayView2<u8>, axis: Axis) -> bool {
    let lanes: Vec<_> = matrix.axis_iter(axis).collect();
    lanes
        .windows(2)
        .all(|pair| pair[0].iter().cmp(pair[1].iter()) != Ordering::Less)
}

/// `ordered[i][j] == original[rows[i]][columns[j]]` for every cell.
pub fn is_consistent(
    original: ArrayView2<u8>,
    ordered: ArrayView2<u8>,
    rows: &[usize],
    columns: &[usize],
) -> bool {
    if ordered.dim() != (rows.len(), columns.len()) {
        return false;
    }

    ordered.indexed_iter().all(|((i, j), &value)| {
        original
            .get((rows[i], columns[j]))
            .map_or(false, |&expected| expected == value)
    })
}

/// `indices` lists every value of `0..n` exactly once.
pub fn is_permutation(indices: &[usize], n: usize) -> bool {
    if indices.len() != n {
        return false;
    }

    let mut seen = vec![false; n];
    for &i in indices {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
