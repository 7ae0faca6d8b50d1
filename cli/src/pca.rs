use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::{info, warn};
use pcalab::{
    eigen::{PowerIteration, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE},
    linalg::Matrix,
    pca::PcaModel,
    table,
};

use crate::util::{self, InputArgs};

/// Principal component analysis
#[derive(Debug, Args)]
#[command(version, about, long_about = None)]
pub struct PcaArgs {
    /// Number of principal components to keep
    #[arg(short = 'k', long, default_value_t = 2)]
    components: usize,
    /// Maximum power iterations per eigen-pair
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iter: usize,
    /// Convergence tolerance of the eigenvalue estimate
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// Where to write the projected data, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    input: InputArgs,
}

pub fn pca_main(args: PcaArgs) -> Result<()> {
    let data = args.input.read_matrix().context("Reading input data")?;
    info!("data loaded: {} samples x {} features", data.height(), data.width());

    let components = effective_components(args.components, data.width());
    let solver = PowerIteration::new(args.max_iter, args.tolerance);
    let delimiter = args.input.delimiter()?;
    let samples = data.height();

    let mut writer = util::get_buff_writer(&args.output)?;
    let model = project(&mut writer, data, components, &solver, &delimiter)?;

    report(&model, samples);
    Ok(())
}

/// Caps the requested component count at the number of features.
fn effective_components(requested: usize, features: usize) -> usize {
    if requested > features {
        warn!(
            "n_components ({}) > n_features ({}), using {}",
            requested, features, features
        );
        return features;
    }
    requested
}

/// Fits on `data`, writes its projection and returns the model.
fn project<W: Write>(
    writer: &mut W,
    data: Matrix,
    components: usize,
    solver: &PowerIteration,
    delimiter: &str,
) -> Result<PcaModel> {
    let (model, projected) = PcaModel::fit_transform_with(data, components, solver)
        .context("Fitting PCA model")?;
    table::write_matrix(writer, &projected, delimiter)?;
    Ok(model)
}

fn report(model: &PcaModel, samples: usize) {
    let features = model.n_features();
    let components = model.n_components();
    info!("original dimensions: {} x {}", samples, features);
    info!("reduced dimensions: {} x {}", samples, components);
    info!(
        "dimensionality reduction: {:.1}%",
        (1.0 - components as f64 / features as f64) * 100.0
    );
    info!(
        "variance explained: {:.2}%",
        model.explained_variance_ratio() * 100.0
    );
    for (i, value) in model.eigenvalues().iter().take(components.min(5)).enumerate() {
        info!("  PC{}: {:.6}", i + 1, value);
    }
}

#[cfg(test)]
mod tests {
    use pcalab::PcaError;

    use super::*;

    fn collinear() -> Matrix {
        Matrix::new(vec![
            1.0, 2.0,
            2.0, 4.0,
            3.0, 6.0,
        ], 3, 2).unwrap()
    }

    #[test]
    fn test_effective_components() {
        assert_eq!(effective_components(5, 3), 3);
        assert_eq!(effective_components(3, 3), 3);
        assert_eq!(effective_components(2, 3), 2);
        assert_eq!(effective_components(0, 3), 0);
    }

    #[test]
    fn test_project_writes_six_decimals() {
        let mut out: Vec<u8> = Vec::new();

        let model = project(&mut out, collinear(), 1, &PowerIteration::default(), ",").unwrap();

        assert_eq!(model.n_components(), 1);
        assert!(model.explained_variance_ratio() <= 1.0);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "-2.236068\n0.000000\n2.236068\n");
    }

    #[test]
    fn test_project_clamped_components() {
        let data = collinear();
        let components = effective_components(4, data.width());
        let mut out: Vec<u8> = Vec::new();

        let model = project(&mut out, data, components, &PowerIteration::default(), "\t").unwrap();

        assert_eq!(model.n_components(), 2);
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 2);
            for field in fields {
                let decimals = field.split('.').nth(1).unwrap();
                assert_eq!(decimals.len(), 6);
            }
        }
    }

    #[test]
    fn test_project_rejects_zero_components() {
        let mut out: Vec<u8> = Vec::new();

        let err = project(&mut out, collinear(), 0, &PowerIteration::default(), ",").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PcaError>(),
            Some(PcaError::InvalidParameter(_))
        ));
        assert!(out.is_empty());
    }
}
