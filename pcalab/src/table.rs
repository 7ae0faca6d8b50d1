//! Headerless delimited text tables of numbers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::linalg::Matrix;

#[derive(Error, Debug, PartialEq)]
pub enum TableParserError {
    #[error("EmptyFile")]
    EmptyFile,
    #[error("LineSizeConflict on line {line}: expected {expected} values, found {found}")]
    LineSizeConflict {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("NotNumeric on line {line}, col {col}: {value:?}")]
    NotNumeric {
        line: usize,
        col: usize,
        value: String,
    },
}

/// Reads one sample per line, `delimiter` separated.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_matrix<R: BufRead>(reader: R, delimiter: &str) -> Result<Matrix> {
    let context = "Parsing table to matrix";

    let mut elements: Vec<f64> = Vec::new();
    let mut width: Option<usize> = None;
    let mut height = 0;
    for (i, line) in reader.lines().enumerate() {
        let line_num = i + 1;
        let line = line.context(context)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entries: Vec<&str> = line.split(delimiter).map(|e| e.trim()).collect();
        let expected = *width.get_or_insert(entries.len());
        if entries.len() != expected {
            return Err(TableParserError::LineSizeConflict {
                line: line_num,
                expected,
                found: entries.len(),
            })
            .context(context);
        }
        for (col, entry) in entries.iter().enumerate() {
            let value = entry.parse::<f64>().map_err(|_| TableParserError::NotNumeric {
                line: line_num,
                col: col + 1,
                value: entry.to_string(),
            })
            .context(context)?;
            elements.push(value);
        }
        height += 1;
    }

    let width = match width {
        Some(w) => w,
        None => return Err(TableParserError::EmptyFile).context(context),
    };
    Matrix::new(elements, height, width).context("Create new matrix")
}

/// Writes every row with six decimal places.
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix, delimiter: &str) -> Result<()> {
    for i in 0..matrix.height() {
        let row = matrix.row(i)?;
        let line: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
        writeln!(writer, "{}", line.join(delimiter)).context("Writing matrix row")?;
    }
    writer.flush().context("Flushing matrix output")?;
    Ok(())
}

/// [`write_matrix`] into a `String`.
pub fn to_csv(matrix: &Matrix, delimiter: &str) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_matrix(&mut buffer, matrix, delimiter)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parse_err(input: &str) -> TableParserError {
        read_matrix(Cursor::new(input), ",")
            .unwrap_err()
            .downcast()
            .unwrap()
    }

    #[test]
    fn test_read_matrix() {
        let input = "1,2,3\n4, 5 ,6\n";

        let result = read_matrix(Cursor::new(input), ",").unwrap();

        let expected = Matrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_read_matrix_skips_comments_and_blank_lines() {
        let input = "# generated\n\n1.5;-2\n\n3e2;0\n";

        let result = read_matrix(Cursor::new(input), ";").unwrap();

        let expected = Matrix::new(vec![1.5, -2.0, 300.0, 0.0], 2, 2).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_read_matrix_empty() {
        assert_eq!(parse_err(""), TableParserError::EmptyFile);
        assert_eq!(parse_err("# only a comment\n"), TableParserError::EmptyFile);
    }

    #[test]
    fn test_read_matrix_line_size_conflict() {
        assert_eq!(
            parse_err("1,2\n3,4\n5\n"),
            TableParserError::LineSizeConflict { line: 3, expected: 2, found: 1 }
        );
    }

    #[test]
    fn test_read_matrix_not_numeric() {
        assert_eq!(
            parse_err("1,2\n3,abc\n"),
            TableParserError::NotNumeric { line: 2, col: 2, value: "abc".into() }
        );
    }

    #[test]
    fn test_to_csv() {
        let a = Matrix::new(vec![1.0, -0.5, 2.0 / 3.0, 1234.5678901], 2, 2).unwrap();

        let result = to_csv(&a, ",").unwrap();

        assert_eq!(result, "1.000000,-0.500000\n0.666667,1234.567890\n");
    }
}
