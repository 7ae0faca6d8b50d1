use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use pcalab::{linalg::Matrix, table};

pub fn get_buff_reader(filename: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if let Some(filename) = filename {
        let file = OpenOptions::new()
            .read(true)
            .open(filename)
            .with_context(|| format!("Opening {}", filename.display()))?;

        Box::new(BufReader::new(file))
    } else {
        let stdin = io::stdin();
        Box::new(BufReader::new(stdin))
    };
    Ok(reader)
}

pub fn get_buff_writer(filename: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if let Some(filename) = filename {
        let file = File::create(filename)
            .with_context(|| format!("Creating {}", filename.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    Ok(writer)
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq)]
pub enum DataType {
    /// Comma separated values
    CSV,
    /// Tab separated values
    TSV,
}

impl DataType {
    pub fn from_filename(filename: &Path) -> Result<Self> {
        let dt = filename
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| DataType::from_str(e, true).ok());

        match dt {
            Some(dt) => Ok(dt),
            None => bail!(
                "File extension couldn't be identified on {}",
                filename.display()
            ),
        }
    }

    pub fn default_delimiter(&self) -> &'static str {
        match self {
            DataType::CSV => ",",
            DataType::TSV => "\t",
        }
    }
}

/// Options shared by every tool that reads a table.
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// The format of the file
    #[arg(value_enum, short, long)]
    pub datatype: Option<DataType>,
    /// Field delimiter, defaults to the one of the datatype
    #[arg(long)]
    pub csv_delim: Option<String>,
    /// File containing data, stdin if omitted
    pub filename: Option<PathBuf>,
}

impl InputArgs {
    pub fn delimiter(&self) -> Result<String> {
        if let Some(d) = &self.csv_delim {
            return Ok(d.clone());
        }
        let datatype = match (self.datatype, &self.filename) {
            (Some(d), _) => d,
            (None, Some(f)) => DataType::from_filename(f)?,
            (None, None) => bail!("No file provided. --datatype must be specified"),
        };
        Ok(datatype.default_delimiter().to_string())
    }

    pub fn read_matrix(&self) -> Result<Matrix> {
        let delimiter = self.delimiter()?;
        let reader = get_buff_reader(&self.filename)?;
        table::read_matrix(reader, &delimiter)
    }
}
