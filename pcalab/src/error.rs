use thiserror::Error;

pub type Result<T, E = PcaError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PcaError {
    #[error("could not allocate a {height}x{width} matrix")]
    Allocation { height: usize, width: usize },

    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        // (height, width) of each operand, vectors as (len, 1)
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("index ({row}, {col}) out of bounds for a {height}x{width} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}
