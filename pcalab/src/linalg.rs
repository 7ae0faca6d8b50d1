use crate::error::{PcaError, Result};

/// Vectors shorter than this are left as they are by [`normalize`].
pub const NORM_EPSILON: f64 = 1e-10;

/// Dense row-major matrix of `f64`.
///
/// The shape is fixed at construction and is never empty: both `height`
/// and `width` are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    elements: Vec<f64>,
    width: usize,
    height: usize,
}

fn alloc_zeroed(height: usize, width: usize) -> Result<Vec<f64>> {
    if height == 0 || width == 0 {
        return Err(PcaError::InvalidParameter(format!(
            "matrix dimensions must be positive, got {}x{}",
            height, width
        )));
    }
    let len = height
        .checked_mul(width)
        .ok_or(PcaError::Allocation { height, width })?;
    let mut elements: Vec<f64> = Vec::new();
    elements
        .try_reserve_exact(len)
        .map_err(|_| PcaError::Allocation { height, width })?;
    elements.resize(len, 0.0);
    Ok(elements)
}

impl Matrix {
    /// Zero-filled `height` x `width` matrix.
    pub fn zeros(height: usize, width: usize) -> Result<Self> {
        let elements = alloc_zeroed(height, width)?;
        Ok(Self {
            elements,
            width,
            height,
        })
    }

    /// Wraps row-major `elements`.
    pub fn new(elements: Vec<f64>, height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(PcaError::InvalidParameter(format!(
                "matrix dimensions must be positive, got {}x{}",
                height, width
            )));
        }
        if height.checked_mul(width) != Some(elements.len()) {
            return Err(PcaError::ShapeMismatch {
                op: "new",
                left: (elements.len(), 1),
                right: (height, width),
            });
        }

        Ok(Self {
            elements,
            height,
            width,
        })
    }

    /// Builds a matrix from equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut matrix = Self::zeros(height, width)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PcaError::ShapeMismatch {
                    op: "from_rows",
                    left: (row.len(), 1),
                    right: (width, 1),
                });
            }
            matrix.elements[i * width..(i + 1) * width].copy_from_slice(row);
        }
        Ok(matrix)
    }

    /// Overwrites every element with the one from `src`.
    pub fn copy_from(&mut self, src: &Matrix) -> Result<()> {
        if self.shape() != src.shape() {
            return Err(PcaError::ShapeMismatch {
                op: "copy",
                left: self.shape(),
                right: src.shape(),
            });
        }
        self.elements.copy_from_slice(&src.elements);
        Ok(())
    }

    pub fn mul(&self, matrix: &Matrix) -> Result<Matrix> {
        if self.width != matrix.height {
            return Err(PcaError::ShapeMismatch {
                op: "mul",
                left: self.shape(),
                right: matrix.shape(),
            });
        }

        let mut result = Matrix::zeros(self.height, matrix.width)?;
        for row in 0..self.height {
            for column in 0..matrix.width {
                let mut value = 0.0;
                for i in 0..self.width {
                    value += self.get_unchecked(row, i) * matrix.get_unchecked(i, column);
                }
                result.set_unchecked(row, column, value);
            }
        }
        Ok(result)
    }

    pub fn vec_mul(&self, vec: &[f64]) -> Result<Vec<f64>> {
        if self.width != vec.len() {
            return Err(PcaError::ShapeMismatch {
                op: "vec_mul",
                left: self.shape(),
                right: (vec.len(), 1),
            });
        }

        let mut result: Vec<f64> = Vec::with_capacity(self.height);
        for i in 0..self.height {
            let mut value = 0.0;
            for j in 0..self.width {
                value += self.get_unchecked(i, j) * vec[j];
            }
            result.push(value);
        }
        Ok(result)
    }

    pub fn transpose(&self) -> Matrix {
        let mut elements: Vec<f64> = Vec::with_capacity(self.elements.len());
        for i in 0..self.width {
            for j in 0..self.height {
                elements.push(self.get_unchecked(j, i));
            }
        }
        Matrix {
            elements,
            width: self.height,
            height: self.width,
        }
    }

    /// The first `k` columns as a new `height` x `k` matrix.
    pub fn leading_columns(&self, k: usize) -> Result<Matrix> {
        if k == 0 || k > self.width {
            return Err(PcaError::InvalidParameter(format!(
                "cannot take {} leading columns of a matrix with {} columns",
                k, self.width
            )));
        }
        let mut result = Matrix::zeros(self.height, k)?;
        for i in 0..self.height {
            let row = &self.elements[i * self.width..i * self.width + k];
            result.elements[i * k..(i + 1) * k].copy_from_slice(row);
        }
        Ok(result)
    }

    pub fn get_col(&self, i: usize) -> Result<Vec<f64>> {
        if i >= self.width {
            return Err(self.out_of_bounds(0, i));
        }
        let mut elements: Vec<f64> = Vec::with_capacity(self.height);
        for j in 0..self.height {
            elements.push(self.get_unchecked(j, i));
        }
        Ok(elements)
    }

    pub fn set_col(&mut self, i: usize, column: &[f64]) -> Result<()> {
        if i >= self.width {
            return Err(self.out_of_bounds(0, i));
        }
        if column.len() != self.height {
            return Err(PcaError::ShapeMismatch {
                op: "set_col",
                left: self.shape(),
                right: (column.len(), 1),
            });
        }

        for j in 0..self.height {
            self.set_unchecked(j, i, column[j]);
        }

        Ok(())
    }

    pub fn row(&self, i: usize) -> Result<&[f64]> {
        if i >= self.height {
            return Err(self.out_of_bounds(i, 0));
        }
        Ok(&self.elements[i * self.width..(i + 1) * self.width])
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.height || col >= self.width {
            Err(self.out_of_bounds(row, col))
        } else {
            Ok(self.get_unchecked(row, col))
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.height || col >= self.width {
            Err(self.out_of_bounds(row, col))
        } else {
            self.set_unchecked(row, col, value);
            Ok(())
        }
    }

    pub(crate) fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        self.elements[row * self.width + col] = value;
    }

    pub(crate) fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        self.elements[row * self.width + col]
    }

    pub fn round(&self, places: i32) -> Self {
        Self {
            elements: round(&self.elements, places),
            width: self.width,
            height: self.height,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.elements
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> PcaError {
        PcaError::OutOfBounds {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }
}

/// A [`Matrix`] with as many rows as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    matrix: Matrix,
    n: usize,
}

impl SquareMatrix {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn vec_mul(&self, vec: &[f64]) -> Result<Vec<f64>> {
        self.matrix.vec_mul(vec)
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        for i in 0..self.n {
            for j in i + 1..self.n {
                let a = self.matrix.get_unchecked(i, j);
                let b = self.matrix.get_unchecked(j, i);
                if (a - b).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Subtracts the rank one matrix `lambda * v * v^T`.
    pub fn deflate(&mut self, lambda: f64, v: &[f64]) -> Result<()> {
        if v.len() != self.n {
            return Err(PcaError::ShapeMismatch {
                op: "deflate",
                left: self.matrix.shape(),
                right: (v.len(), 1),
            });
        }
        for i in 0..self.n {
            for j in 0..self.n {
                let value = self.matrix.get_unchecked(i, j) - lambda * v[i] * v[j];
                self.matrix.set_unchecked(i, j, value);
            }
        }
        Ok(())
    }

    pub fn get_diagonal(&self) -> Vec<f64> {
        let mut elements = Vec::with_capacity(self.n);
        for i in 0..self.n {
            elements.push(self.matrix.get_unchecked(i, i));
        }
        elements
    }
}

impl TryFrom<Matrix> for SquareMatrix {
    type Error = PcaError;
    fn try_from(value: Matrix) -> std::result::Result<Self, Self::Error> {
        if value.height != value.width {
            Err(PcaError::ShapeMismatch {
                op: "square",
                left: value.shape(),
                right: (value.width, value.width),
            })
        } else {
            Ok(SquareMatrix {
                n: value.width,
                matrix: value,
            })
        }
    }
}

impl From<SquareMatrix> for Matrix {
    fn from(value: SquareMatrix) -> Self {
        value.matrix
    }
}

pub fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter()
        .zip(v.iter())
        .fold(0.0, |acc, (a, b)| acc + a * b)
}

pub fn norm(u: &[f64]) -> f64 {
    u.iter()
        .fold(0.0, |acc, a| acc + a * a)
        .sqrt()
}

/// Scales `u` to unit length unless its norm is at most [`NORM_EPSILON`].
pub fn normalize(u: &mut [f64]) {
    let n = norm(u);
    if n > NORM_EPSILON {
        for a in u.iter_mut() {
            *a /= n;
        }
    }
}

pub fn round(u: &[f64], places: i32) -> Vec<f64> {
    let shift = 10.0_f64.powi(places);
    u.iter()
        .map(|a| (a * shift).round() / shift)
        .collect()
}
