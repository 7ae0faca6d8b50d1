use log::{debug, info};

use crate::{
    agg::{center, column_means, covariance},
    eigen::{PowerIteration, Seed},
    error::{PcaError, Result},
    linalg::Matrix,
};

/// A fitted principal component model.
///
/// Holds the training means, every eigen-pair of the training covariance
/// (sorted by descending eigenvalue) and the number of components kept by
/// [`PcaModel::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct PcaModel {
    means: Vec<f64>,
    eigenvalues: Vec<f64>,
    eigenvectors: Matrix,
    n_components: usize,
    explained_variance_ratio: f64,
}

/// Result of [`PcaModel::fit`]: the model and the training data after
/// mean-centering.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub model: PcaModel,
    pub centered: Matrix,
}

impl PcaModel {
    /// Fits with the default [`PowerIteration`] solver.
    pub fn fit(data: Matrix, n_components: usize) -> Result<Fit> {
        Self::fit_with(data, n_components, &PowerIteration::default())
    }

    pub fn fit_with<S: Seed>(
        mut data: Matrix,
        n_components: usize,
        solver: &PowerIteration<S>,
    ) -> Result<Fit> {
        if n_components == 0 || n_components > data.width() {
            return Err(PcaError::InvalidParameter(format!(
                "n_components must be between 1 and {}, got {}",
                data.width(),
                n_components
            )));
        }
        debug!(
            "fitting {} samples x {} features to {} components",
            data.height(),
            data.width(),
            n_components
        );

        let means = column_means(&data);
        center(&mut data, &means)?;
        let cov = covariance(&data)?;
        let mut pairs = solver.eigen_pairs(&cov)?;
        pairs.sort_descending()?;
        let (eigenvalues, eigenvectors) = pairs.into_parts();

        let total: f64 = eigenvalues.iter().sum();
        let kept: f64 = eigenvalues[..n_components].iter().sum();
        // all-zero spectrum, e.g. a single sample or constant columns
        let explained_variance_ratio = if total == 0.0 {
            0.0
        } else {
            // deflation leaves trailing eigenvalues a few ulps below zero
            (kept / total).clamp(0.0, 1.0)
        };
        info!(
            "explained variance ratio: {:.4} ({:.2}%)",
            explained_variance_ratio,
            explained_variance_ratio * 100.0
        );

        Ok(Fit {
            model: Self {
                means,
                eigenvalues,
                eigenvectors,
                n_components,
                explained_variance_ratio,
            },
            centered: data,
        })
    }

    /// Fits on `data` and projects the same samples.
    pub fn fit_transform(data: Matrix, n_components: usize) -> Result<(Self, Matrix)> {
        Self::fit_transform_with(data, n_components, &PowerIteration::default())
    }

    pub fn fit_transform_with<S: Seed>(
        data: Matrix,
        n_components: usize,
        solver: &PowerIteration<S>,
    ) -> Result<(Self, Matrix)> {
        let Fit { model, centered } = Self::fit_with(data, n_components, solver)?;
        let projected = model.project(&centered)?;
        Ok((model, projected))
    }

    /// Centers `data` with the training means and projects it onto the
    /// leading `n_components` eigenvectors.
    pub fn transform(&self, mut data: Matrix) -> Result<Matrix> {
        if data.width() != self.n_features() {
            return Err(PcaError::ShapeMismatch {
                op: "transform",
                left: data.shape(),
                right: self.eigenvectors.shape(),
            });
        }
        center(&mut data, &self.means)?;
        self.project(&data)
    }

    fn project(&self, centered: &Matrix) -> Result<Matrix> {
        let projected = centered.mul(&self.components()?)?;
        debug!(
            "projected {} samples to {} components",
            projected.height(),
            projected.width()
        );
        Ok(projected)
    }

    /// The leading `n_components` eigenvectors as columns.
    pub fn components(&self) -> Result<Matrix> {
        self.eigenvectors.leading_columns(self.n_components)
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// All eigenvalues, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Matrix {
        &self.eigenvectors
    }

    /// Eigenvalues of the kept components.
    pub fn explained_variance(&self) -> &[f64] {
        &self.eigenvalues[..self.n_components]
    }

    pub fn explained_variance_ratio(&self) -> f64 {
        self.explained_variance_ratio
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}
