#![allow(non_snake_case)]

use crate::algebra::FloatT;
use crate::canon::{AffineMap, CanonError, CanonicalArray, ReducedProblem, SettingDescriptor};
use enum_dispatch::*;

mod conic;
mod qp;
pub use conic::*;
pub use qp::*;

/// Identifiers for the solver data blocks ("canonical arrays") the engine
/// can derive.
///
/// Each solver layout uses a fixed subset of these, in a fixed order; see
/// [`CanonicalFormat::array_ids`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalArrayId {
    /// quadratic cost matrix (qp layout)
    CostMatrix,
    /// linear cost vector
    CostVector,
    /// constant cost offset
    CostOffset,
    /// stacked constraint matrix (qp layout)
    ConstraintMatrix,
    /// lower bound vector (qp layout)
    LowerBound,
    /// upper bound vector (qp layout)
    UpperBound,
    /// equality constraint matrix (conic layout)
    EqualityMatrix,
    /// equality right-hand side (conic layout)
    EqualityVector,
    /// inequality (cone) constraint matrix (conic layout)
    InequalityMatrix,
    /// inequality (cone) right-hand side (conic layout)
    InequalityVector,
}

impl CanonicalArrayId {
    /// The short solver-facing name used in emitted code and artifacts.
    pub fn label(&self) -> &'static str {
        use CanonicalArrayId::*;
        match self {
            CostMatrix => "P",
            CostVector => "q",
            CostOffset => "d",
            ConstraintMatrix => "A",
            LowerBound => "l",
            UpperBound => "u",
            EqualityMatrix => "A",
            EqualityVector => "b",
            InequalityMatrix => "G",
            InequalityVector => "h",
        }
    }
}

/// A solver canonical layout: the fixed set of canonical arrays a target
/// solver consumes, and how each is derived from the reduction output.
///
/// One implementation exists per supported layout and is selected once at
/// generation time through [`SupportedFormat`].
#[enum_dispatch]
pub trait CanonicalFormat<T>
where
    T: FloatT,
{
    /// layout name, as recorded in generated artifacts
    fn name(&self) -> &'static str;

    /// the layout's canonical array ids, in its fixed order
    fn array_ids(&self) -> &'static [CanonicalArrayId];

    /// layout-specific structural validation of the reduction output
    fn check_problem(&self, prob: &ReducedProblem<T>) -> Result<(), CanonError>;

    /// Derive the affine map, shape and sparsity structure of one canonical
    /// array.
    ///
    /// Requesting an id outside the layout's role set is a contract
    /// violation and fails without producing anything.
    fn build_array(
        &self,
        id: CanonicalArrayId,
        prob: &ReducedProblem<T>,
    ) -> Result<CanonicalArray<T>, CanonError>;

    /// native solver settings descriptors embedded in the artifact
    fn setting_descriptors(&self) -> Vec<SettingDescriptor<T>>;
}

/// The supported canonical layouts as a tagged variant, so that a layout
/// chosen at generation time dispatches statically.
#[enum_dispatch(CanonicalFormat<T>)]
#[derive(Debug, Clone)]
pub enum SupportedFormat<T: FloatT> {
    Qp(QpFormat<T>),
    Conic(ConicFormat<T>),
}

// cost builders shared by both layouts: the linear cost block carries the
// coefficient rows followed by a single constant offset row

pub(crate) fn cost_vector_array<T: FloatT>(
    id: CanonicalArrayId,
    prob: &ReducedProblem<T>,
) -> CanonicalArray<T> {
    let n = prob.dims.n_var;
    let rowmap: Vec<Option<usize>> = (0..prob.lin_cost.m).map(|r| (r < n).then_some(r)).collect();
    let mat = prob.lin_cost.gather_rows(&rowmap, n);
    CanonicalArray::new(id, (n, 1), AffineMap::new(mat), None)
}

pub(crate) fn cost_offset_array<T: FloatT>(
    id: CanonicalArrayId,
    prob: &ReducedProblem<T>,
) -> CanonicalArray<T> {
    let n = prob.dims.n_var;
    let rowmap: Vec<Option<usize>> = (0..prob.lin_cost.m)
        .map(|r| (r == n).then_some(0))
        .collect();
    let mat = prob.lin_cost.gather_rows(&rowmap, 1);
    CanonicalArray::new(id, (1, 1), AffineMap::new(mat), None)
}
