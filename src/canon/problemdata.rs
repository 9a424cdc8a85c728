#![allow(non_snake_case)]
use crate::algebra::{CscMatrix, FloatT};
use crate::canon::{CanonError, ParameterSpace, SparsityPattern};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cone dimensions for the conic layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConeDims {
    /// number of nonnegative cone rows
    pub nonneg: usize,
    /// second-order cone dimensions
    pub soc: Vec<usize>,
    /// number of exponential cones (three rows each)
    pub exp: usize,
}

impl ConeDims {
    /// Total number of inequality rows covered by the cones.
    pub fn degree(&self) -> usize {
        self.nonneg + self.soc.iter().sum::<usize>() + 3 * self.exp
    }
}

/// Fixed problem-shape sizes, invariant once the problem structure is
/// known and independent of parameter values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructuralConstants {
    /// number of optimization variables
    pub n_var: usize,
    /// number of equality rows
    pub n_eq: usize,
    /// number of inequality rows
    pub n_ineq: usize,
    /// cone dimensions (empty for the qp layout)
    pub cones: ConeDims,
}

/// Per-nonzero affine data for the quadratic cost block.
///
/// Row `k` of `map` expresses the k-th structural nonzero of the cost
/// matrix linearly in the flattened parameter vector; `pattern` fixes where
/// those nonzeros sit.
#[derive(Debug, Clone)]
pub struct QuadBlock<T = f64> {
    pub map: CscMatrix<T>,
    pub pattern: SparsityPattern,
}

/// Per-data-entry affine map of the stacked constraint block.
///
/// The reduction layer expresses all constraint data, matrix coefficients
/// and constant-side entries alike, as one matrix with a row per data
/// entry and a column per flattened parameter entry.   The companion index
/// arrays locate each data entry in the constraint block's CSC structure:
/// `rowval[k]` is the structural row of entry `k`, and `colptr` spans
/// `n_var + 1` columns, the final column holding the constant-side
/// (right-hand-side / bound) entries.
#[derive(Debug, Clone)]
pub struct ConstraintBlock<T = f64> {
    pub map: CscMatrix<T>,
    pub rowval: Vec<usize>,
    pub colptr: Vec<usize>,
}

impl<T> ConstraintBlock<T>
where
    T: FloatT,
{
    /// total number of data entries
    pub fn n_data(&self) -> usize {
        self.rowval.len()
    }

    /// number of data entries in the matrix part (all but the final column)
    pub fn n_matrix(&self) -> usize {
        self.colptr[self.colptr.len() - 2]
    }
}

/// Output of the upstream reduction layer: everything the engine needs to
/// derive canonical arrays for one problem.
#[derive(Debug, Clone)]
pub struct ReducedProblem<T = f64> {
    /// the ordered parameter list with fixed column offsets
    pub params: ParameterSpace,
    /// (n_var + 1) × flat_len; rows 0..n_var are the linear cost
    /// coefficients, the final row is the constant cost offset
    pub lin_cost: CscMatrix<T>,
    /// quadratic cost block; required by the qp layout, absent for conic
    pub quad_cost: Option<QuadBlock<T>>,
    /// the stacked constraint block
    pub constraints: ConstraintBlock<T>,
    /// fixed structural sizes
    pub dims: StructuralConstants,
}

impl<T> ReducedProblem<T>
where
    T: FloatT,
{
    /// Structural validation of the reduction output.
    ///
    /// Any inconsistency between the declared sizes and the supplied arrays
    /// aborts the whole generation pass.
    pub(crate) fn validate(&self) -> Result<(), CanonError> {
        let flat = self.params.flat_len();
        let n = self.dims.n_var;
        let m = self.dims.n_eq + self.dims.n_ineq;

        if self.lin_cost.n != flat {
            return Err(CanonError::StructuralMismatch(
                "linear cost column count does not match the flattened parameter length",
            ));
        }
        if self.lin_cost.m != n + 1 {
            return Err(CanonError::StructuralMismatch(
                "linear cost row count does not match the variable count",
            ));
        }
        self.lin_cost.check_format()?;

        let cb = &self.constraints;
        if cb.map.n != flat {
            return Err(CanonError::StructuralMismatch(
                "constraint map column count does not match the flattened parameter length",
            ));
        }
        if cb.map.m != cb.rowval.len() {
            return Err(CanonError::StructuralMismatch(
                "constraint map row count does not match the structural index count",
            ));
        }
        cb.map.check_format()?;

        // the structural index arrays must form a valid CSC skeleton over
        // n_var + 1 columns and n_eq + n_ineq rows
        let skeleton = SparsityPattern::new((m, n + 1), cb.rowval.clone(), cb.colptr.clone());
        skeleton.check_format()?;

        if let Some(quad) = &self.quad_cost {
            if quad.map.n != flat {
                return Err(CanonError::StructuralMismatch(
                    "quadratic cost map column count does not match the flattened parameter length",
                ));
            }
            if quad.pattern.shape != (n, n) {
                return Err(CanonError::StructuralMismatch(
                    "quadratic cost pattern shape does not match the variable count",
                ));
            }
            quad.pattern.check_format()?;
            if quad.pattern.nnz() != quad.map.m {
                return Err(CanonError::StructuralMismatch(
                    "quadratic cost map row count does not match its pattern",
                ));
            }
            quad.map.check_format()?;
        }

        Ok(())
    }
}

// ---------- unit tests
