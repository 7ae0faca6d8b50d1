//! Eigen decomposition of symmetric matrices by power iteration with deflation.

use log::{debug, trace};

use crate::{
    error::{PcaError, Result},
    linalg::{dot, normalize, Matrix, SquareMatrix},
};

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Produces the starting vector of every power iteration.
pub trait Seed {
    fn seed(&self, n: usize) -> Vec<f64>;
}

/// Every component equal to `1 / sqrt(n)`. Makes fitting reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSeed;

impl Seed for UniformSeed {
    fn seed(&self, n: usize) -> Vec<f64> {
        vec![1.0 / (n as f64).sqrt(); n]
    }
}

/// Eigenvalues and the matching eigenvectors, stored as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPairs {
    values: Vec<f64>,
    vectors: Matrix,
}

impl EigenPairs {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn vectors(&self) -> &Matrix {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sort_descending(&mut self) -> Result<()> {
        sort_descending(&mut self.values, &mut self.vectors)
    }

    pub fn into_parts(self) -> (Vec<f64>, Matrix) {
        (self.values, self.vectors)
    }
}

#[derive(Debug, Clone)]
pub struct PowerIteration<S = UniformSeed> {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub seed: S,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            seed: UniformSeed,
        }
    }
}

impl PowerIteration {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            seed: UniformSeed,
        }
    }
}

impl<S: Seed> PowerIteration<S> {
    pub fn with_seed<T: Seed>(self, seed: T) -> PowerIteration<T> {
        PowerIteration {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            seed,
        }
    }

    /// Extracts all `n` eigen-pairs of the symmetric matrix `a`, in the
    /// order they are found.
    ///
    /// Running out of iterations is not an error, the last estimate is kept.
    pub fn eigen_pairs(&self, a: &SquareMatrix) -> Result<EigenPairs> {
        let n = a.n();
        let mut deflated = a.clone();
        let mut values = Vec::with_capacity(n);
        let mut vectors = Matrix::zeros(n, n)?;

        for k in 0..n {
            let (lambda, v, iterations) = self.dominant(&deflated)?;
            debug!(
                "eigen-pair {}: lambda = {:.6e} after {} iterations",
                k, lambda, iterations
            );
            values.push(lambda);
            vectors.set_col(k, &v)?;
            deflated.deflate(lambda, &v)?;
        }

        Ok(EigenPairs { values, vectors })
    }

    /// Power iteration for the dominant eigen-pair of `a`.
    ///
    /// The eigenvalue estimate is `(A v) . v` taken before `A v` is
    /// normalized, against the previous `v`. That is only the Rayleigh
    /// quotient while `v` has unit length, which does not hold for the
    /// first step of a custom seed or for vectors below the normalization
    /// threshold.
    ///
    /// With the uniform seed, a matrix that is exactly a multiple of the
    /// identity does not yield equal eigenvalues: after the first deflation
    /// the seed lies in the null space of the remaining matrix, so every
    /// later pair comes out as `(~0, zero vector)`.
    fn dominant(&self, a: &SquareMatrix) -> Result<(f64, Vec<f64>, usize)> {
        let n = a.n();
        let mut v = self.seed.seed(n);
        if v.len() != n {
            return Err(PcaError::ShapeMismatch {
                op: "seed",
                left: (v.len(), 1),
                right: (n, 1),
            });
        }

        let mut lambda = 0.0;
        let mut iterations = 0;
        while iterations < self.max_iterations {
            iterations += 1;
            let mut next = a.vec_mul(&v)?;
            let estimate = dot(&next, &v);
            normalize(&mut next);
            let converged = (estimate - lambda).abs() < self.tolerance;
            lambda = estimate;
            v = next;
            if converged {
                break;
            }
        }
        trace!("dominant eigenvector: {:?}", v);

        Ok((lambda, v, iterations))
    }
}

/// Stable joint sort of `values` (descending) and the matching columns of
/// `vectors`.
pub fn sort_descending(values: &mut [f64], vectors: &mut Matrix) -> Result<()> {
    if vectors.width() != values.len() {
        return Err(PcaError::ShapeMismatch {
            op: "sort_descending",
            left: (values.len(), 1),
            right: vectors.shape(),
        });
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[j].total_cmp(&values[i]));

    let sorted_values: Vec<f64> = order.iter().map(|&i| values[i]).collect();
    let mut sorted_vectors = Matrix::zeros(vectors.height(), vectors.width())?;
    for (dest, &src) in order.iter().enumerate() {
        sorted_vectors.set_col(dest, &vectors.get_col(src)?)?;
    }

    values.copy_from_slice(&sorted_values);
    vectors.copy_from(&sorted_vectors)?;
    Ok(())
}
