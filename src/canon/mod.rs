//! Parametric canonicalization engine.
//!
//! The canonicalization pass runs once per (problem, layout) pair: it
//! derives, for every canonical array the target solver consumes, the
//! sparse affine map from the flattened parameter vector to that array's
//! values, fixes the array's sparsity structure, and computes which
//! parameters affect which arrays.   After generation, re-solving for new
//! parameter values is a values-only update driven by those maps.

use thiserror::Error;

use crate::algebra::SparseFormatError;

mod affine;
mod artifact;
mod canonicalizer;
mod data_updating;
mod dependency;
mod encoding;
pub mod formats;
mod infbounds;
mod parameters;
mod problemdata;
mod settings;

#[cfg(feature = "serde")]
mod json;

pub use affine::*;
pub use artifact::*;
pub use canonicalizer::*;
pub use data_updating::*;
pub use dependency::*;
pub use encoding::*;
pub use formats::{CanonicalArrayId, CanonicalFormat, ConicFormat, QpFormat, SupportedFormat};
pub use infbounds::*;
pub use parameters::*;
pub use problemdata::*;
pub use settings::*;

/// Error type returned by the canonicalization pass.
///
/// Every failure aborts the whole generation pass; nothing partial is ever
/// produced.
#[derive(Error, Debug)]
pub enum CanonError {
    /// a canonical array id outside the requested layout's role set
    #[error("Array {0:?} is not part of the {1} layout")]
    UnknownArray(CanonicalArrayId, &'static str),
    /// a layout name with no defined role set
    #[error("Unsupported canonical layout \"{0}\"")]
    UnsupportedLayout(String),
    /// reduction output inconsistent with the declared structural constants
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(&'static str),
    /// a parameter id that is not part of the parameter space
    #[error("Unknown parameter id {0:?}")]
    UnknownParameter(ParameterId),
    /// a declared parameter with no assigned value
    #[error("No value supplied for parameter {0:?}")]
    MissingParameterValue(ParameterId),
    /// a parameter value whose length does not match its declared shape
    #[error("Value for parameter {0:?} has the wrong length")]
    BadParameterValue(ParameterId),
    /// an invalid parameter declaration list
    #[error("Bad parameter list: {0}")]
    BadParameterList(&'static str),
    /// defective sparse matrix data
    #[error("Data formatting error")]
    BadFormat(#[from] SparseFormatError),
}
