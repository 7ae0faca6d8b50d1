//! Principal component analysis computed from first principles.
//!
//! ```
//! use pcalab::{linalg::Matrix, pca::PcaModel};
//!
//! let data = Matrix::from_rows(&[
//!     vec![1.0, 2.0],
//!     vec![3.0, 4.0],
//!     vec![5.0, 6.0],
//!     vec![7.0, 8.0],
//! ])?;
//! let (model, projected) = PcaModel::fit_transform(data, 1)?;
//! assert_eq!(projected.shape(), (4, 1));
//! assert!(model.explained_variance_ratio() > 0.999);
//! # Ok::<(), pcalab::PcaError>(())
//! ```

pub mod agg;
pub mod eigen;
pub mod error;
pub mod linalg;
pub mod pca;
pub mod table;

pub use error::{PcaError, Result};
