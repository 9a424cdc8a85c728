use crate::algebra::FloatT;
use crate::canon::formats::{cost_offset_array, cost_vector_array, CanonicalArrayId, CanonicalFormat};
use crate::canon::{
    AffineMap, CanonError, CanonicalArray, ConicSolverSettings, ReducedProblem, SettingDescriptor,
    SparsityPattern,
};

use CanonicalArrayId::*;

static CONIC_ARRAYS: [CanonicalArrayId; 6] = [
    CostVector,
    CostOffset,
    EqualityMatrix,
    EqualityVector,
    InequalityMatrix,
    InequalityVector,
];

/// The conic canonical layout.
///
/// Targets solvers consuming `cᵀx (+d)` subject to `Ax = b` and
/// `h - Gx ∈ K`, with equality rows first in the stacked constraint block
/// and cone rows following.
#[derive(Debug, Clone)]
pub struct ConicFormat<T: FloatT> {
    /// native solver settings embedded in the artifact
    pub settings: ConicSolverSettings<T>,
}

impl<T> ConicFormat<T>
where
    T: FloatT,
{
    pub fn new(settings: ConicSolverSettings<T>) -> Self {
        Self { settings }
    }
}

impl<T> Default for ConicFormat<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(ConicSolverSettings::default())
    }
}

impl<T> CanonicalFormat<T> for ConicFormat<T>
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        "conic"
    }

    fn array_ids(&self) -> &'static [CanonicalArrayId] {
        &CONIC_ARRAYS
    }

    fn check_problem(&self, prob: &ReducedProblem<T>) -> Result<(), CanonError> {
        if prob.quad_cost.is_some() {
            return Err(CanonError::StructuralMismatch(
                "the conic layout does not take a quadratic cost block",
            ));
        }
        if prob.dims.cones.degree() != prob.dims.n_ineq {
            return Err(CanonError::StructuralMismatch(
                "cone dimensions do not sum to the inequality row count",
            ));
        }
        Ok(())
    }

    fn build_array(
        &self,
        id: CanonicalArrayId,
        prob: &ReducedProblem<T>,
    ) -> Result<CanonicalArray<T>, CanonError> {
        let array = match id {
            CostVector => cost_vector_array(id, prob),
            CostOffset => cost_offset_array(id, prob),
            EqualityMatrix => constraint_rows_array(id, prob, true),
            InequalityMatrix => constraint_rows_array(id, prob, false),
            EqualityVector => constraint_const_array(id, prob, true),
            InequalityVector => constraint_const_array(id, prob, false),
            _ => return Err(CanonError::UnknownArray(id, self.name())),
        };

        Ok(array)
    }

    fn setting_descriptors(&self) -> Vec<SettingDescriptor<T>> {
        self.settings.descriptors()
    }
}

// The equality and inequality halves of the stacked constraint block share
// one underlying matrix, so data-entry order and structural row order
// diverge after the split.   Matrix halves keep their per-column entry
// order and rebuild column pointers by counting survivors; constant-side
// halves scatter by structural row.

fn constraint_rows_array<T: FloatT>(
    id: CanonicalArrayId,
    prob: &ReducedProblem<T>,
    eq: bool,
) -> CanonicalArray<T> {
    let dims = &prob.dims;
    let cb = &prob.constraints;
    let (n, n_eq) = (dims.n_var, dims.n_eq);
    let (m_out, shift) = if eq { (n_eq, 0) } else { (dims.n_ineq, n_eq) };

    let mut rowmap = vec![None; cb.n_data()];
    let mut rowval = Vec::new();
    let mut colptr = vec![0usize; n + 1];
    let mut count = 0;
    for col in 0..n {
        for k in cb.colptr[col]..cb.colptr[col + 1] {
            let r = cb.rowval[k];
            if (r < n_eq) == eq {
                rowmap[k] = Some(count);
                rowval.push(r - shift);
                count += 1;
            }
        }
        colptr[col + 1] = count;
    }

    let mut mat = cb.map.gather_rows(&rowmap, count);
    mat.negate();
    let pattern = SparsityPattern::new((m_out, n), rowval, colptr);
    CanonicalArray::new(id, (m_out, n), AffineMap::new(mat), Some(pattern))
}

fn constraint_const_array<T: FloatT>(
    id: CanonicalArrayId,
    prob: &ReducedProblem<T>,
    eq: bool,
) -> CanonicalArray<T> {
    let dims = &prob.dims;
    let cb = &prob.constraints;
    let n_eq = dims.n_eq;
    let (m_out, shift) = if eq { (n_eq, 0) } else { (dims.n_ineq, n_eq) };

    let mut rowmap = vec![None; cb.n_data()];
    for k in cb.n_matrix()..cb.n_data() {
        let r = cb.rowval[k];
        if (r < n_eq) == eq {
            rowmap[k] = Some(r - shift);
        }
    }

    let mat = cb.map.gather_rows(&rowmap, m_out);
    CanonicalArray::new(id, (m_out, 1), AffineMap::new(mat), None)
}
