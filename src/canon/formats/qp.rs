use crate::algebra::{AsFloatT, FloatT};
use crate::canon::formats::{cost_offset_array, cost_vector_array, CanonicalArrayId, CanonicalFormat};
use crate::canon::{
    get_infinity, AffineMap, CanonError, CanonicalArray, QpSolverSettings, ReducedProblem,
    SettingDescriptor, SparsityPattern,
};

use CanonicalArrayId::*;

static QP_ARRAYS: [CanonicalArrayId; 6] = [
    CostMatrix,
    CostVector,
    CostOffset,
    ConstraintMatrix,
    LowerBound,
    UpperBound,
];

/// The quadratic-program canonical layout.
///
/// Targets solvers consuming `½xᵀPx + qᵀx (+d)` subject to `l ≤ Ax ≤ u`,
/// with equality rows first.   One-sided inequality rows carry a lower
/// bound pinned at `-infbound`.
#[derive(Debug, Clone)]
pub struct QpFormat<T: FloatT> {
    /// native solver settings embedded in the artifact
    pub settings: QpSolverSettings<T>,
    /// magnitude standing in for ∞ on absent bound sides
    pub infbound: T,
}

impl<T> QpFormat<T>
where
    T: FloatT,
{
    pub fn new(settings: QpSolverSettings<T>) -> Self {
        Self {
            settings,
            infbound: get_infinity().as_T(),
        }
    }
}

impl<T> Default for QpFormat<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(QpSolverSettings::default())
    }
}

impl<T> CanonicalFormat<T> for QpFormat<T>
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        "qp"
    }

    fn array_ids(&self) -> &'static [CanonicalArrayId] {
        &QP_ARRAYS
    }

    fn check_problem(&self, prob: &ReducedProblem<T>) -> Result<(), CanonError> {
        if prob.quad_cost.is_none() {
            return Err(CanonError::StructuralMismatch(
                "the qp layout requires a quadratic cost block",
            ));
        }
        Ok(())
    }

    fn build_array(
        &self,
        id: CanonicalArrayId,
        prob: &ReducedProblem<T>,
    ) -> Result<CanonicalArray<T>, CanonError> {
        let dims = &prob.dims;
        let (n, m) = (dims.n_var, dims.n_eq + dims.n_ineq);
        let cb = &prob.constraints;

        let array = match id {
            CostMatrix => {
                let quad = prob.quad_cost.as_ref().ok_or(CanonError::StructuralMismatch(
                    "the qp layout requires a quadratic cost block",
                ))?;
                CanonicalArray::new(
                    id,
                    (n, n),
                    AffineMap::new(quad.map.clone()),
                    Some(quad.pattern.clone()),
                )
            }
            CostVector => cost_vector_array(id, prob),
            CostOffset => cost_offset_array(id, prob),
            ConstraintMatrix => {
                // matrix-part data entries keep their order; the constant
                // column is dropped from the structure
                let n_matrix = cb.n_matrix();
                let rowmap: Vec<Option<usize>> = (0..cb.n_data())
                    .map(|k| (k < n_matrix).then_some(k))
                    .collect();
                let mat = cb.map.gather_rows(&rowmap, n_matrix);
                let pattern = SparsityPattern::new(
                    (m, n),
                    cb.rowval[..n_matrix].to_vec(),
                    cb.colptr[..=n].to_vec(),
                );
                CanonicalArray::new(id, (m, n), AffineMap::new(mat), Some(pattern))
            }
            LowerBound => {
                // finite part: constant-column entries on equality rows,
                // scattered by structural row.   Inequality rows have no
                // finite lower bound and form the sentinel tail.
                let mut rowmap = vec![None; cb.n_data()];
                for k in cb.n_matrix()..cb.n_data() {
                    if cb.rowval[k] < dims.n_eq {
                        rowmap[k] = Some(cb.rowval[k]);
                    }
                }
                let mut mat = cb.map.gather_rows(&rowmap, dims.n_eq);
                mat.negate();
                let map = AffineMap::with_sentinel(mat, dims.n_ineq, -self.infbound);
                CanonicalArray::new(id, (m, 1), map, None)
            }
            UpperBound => {
                let mut rowmap = vec![None; cb.n_data()];
                for k in cb.n_matrix()..cb.n_data() {
                    rowmap[k] = Some(cb.rowval[k]);
                }
                let mut mat = cb.map.gather_rows(&rowmap, m);
                mat.negate();
                CanonicalArray::new(id, (m, 1), AffineMap::new(mat), None)
            }
            _ => return Err(CanonError::UnknownArray(id, self.name())),
        };

        Ok(array)
    }

    fn setting_descriptors(&self) -> Vec<SettingDescriptor<T>> {
        self.settings.descriptors()
    }
}
