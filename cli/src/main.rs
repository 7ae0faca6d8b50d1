mod cov;
mod pca;
mod util;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cov::CovArgs;
use log::error;
use pca::PcaArgs;

/// Principal component analysis tools
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    tool: Tool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Tool {
    /// Reduce a table to its principal components
    #[command(version, about, long_about = None)]
    PCA(PcaArgs),

    /// Print the sample covariance matrix of a table
    #[command(version, about, long_about = None)]
    Cov(CovArgs),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.tool {
        Tool::PCA(args) => pca::pca_main(args),
        Tool::Cov(args) => cov::cov_main(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
