//! Column statistics over a [`Matrix`] of samples (rows) by features (columns).

use log::debug;

use crate::{
    error::{PcaError, Result},
    linalg::{Matrix, SquareMatrix},
};

/// Arithmetic mean of every column.
pub fn column_means(matrix: &Matrix) -> Vec<f64> {
    let mut means = vec![0.0; matrix.width()];
    for i in 0..matrix.height() {
        for j in 0..matrix.width() {
            means[j] += matrix.get_unchecked(i, j);
        }
    }
    // height is never 0
    let height = matrix.height() as f64;
    for mean in means.iter_mut() {
        *mean /= height;
    }
    means
}

/// Subtracts `means[j]` from every element of column `j`, in place.
pub fn center(matrix: &mut Matrix, means: &[f64]) -> Result<()> {
    if means.len() != matrix.width() {
        return Err(PcaError::ShapeMismatch {
            op: "center",
            left: matrix.shape(),
            right: (means.len(), 1),
        });
    }
    let width = matrix.width();
    for row in matrix.as_mut_slice().chunks_exact_mut(width) {
        for (value, mean) in row.iter_mut().zip(means) {
            *value -= mean;
        }
    }
    Ok(())
}

/// Sample covariance `X^T X / max(n - 1, 1)` of already centered columns.
pub fn covariance(centered: &Matrix) -> Result<SquareMatrix> {
    let mut cov = centered.transpose().mul(centered)?;
    let divisor = if centered.height() > 1 {
        (centered.height() - 1) as f64
    } else {
        1.0
    };
    for value in cov.as_mut_slice() {
        *value /= divisor;
    }
    debug!("covariance matrix: {}x{}", cov.height(), cov.width());
    cov.try_into()
}
