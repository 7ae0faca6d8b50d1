use anyhow::{Context, Result};
use clap::Args;
use pcalab::{
    agg::{center, column_means, covariance},
    linalg::Matrix,
    table,
};

use crate::util::{self, InputArgs};

/// Sample covariance matrix
#[derive(Debug, Args)]
#[command(version, about, long_about = None)]
pub struct CovArgs {
    #[command(flatten)]
    input: InputArgs,
}

pub fn cov_main(args: CovArgs) -> Result<()> {
    let mut data = args.input.read_matrix().context("Reading input data")?;
    let means = column_means(&data);
    center(&mut data, &means)?;
    let cov: Matrix = covariance(&data)?.into();

    let delimiter = args.input.delimiter()?;
    let mut writer = util::get_buff_writer(&None)?;
    table::write_matrix(&mut writer, &cov, &delimiter)
}
