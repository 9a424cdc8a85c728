use crate::algebra::FloatT;
use crate::canon::formats::CanonicalArrayId;
use crate::canon::{CanonError, Canonicalizer, ParameterId, ParameterValues};
use itertools::Itertools;
use std::iter::zip;

/// The exact set of canonical arrays to recompute for one changed-parameter
/// set, in layout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// arrays whose outdated set intersects the changed parameters
    pub arrays: Vec<CanonicalArrayId>,
}

impl<T> Canonicalizer<T>
where
    T: FloatT,
{
    /// Determine which canonical arrays must be recomputed when the given
    /// parameters have changed since the previous solve.
    ///
    /// The plan contains exactly the arrays adjacent to some changed
    /// parameter; a parameter-invariant array never appears in it.
    /// Unknown parameter ids fail before anything else happens.
    pub fn plan(&self, changed: &[ParameterId]) -> Result<UpdatePlan, CanonError> {
        let changed_idx: Vec<usize> = changed
            .iter()
            .map(|&id| {
                self.params
                    .index_of(id)
                    .ok_or(CanonError::UnknownParameter(id))
            })
            .collect::<Result<Vec<usize>, _>>()?
            .into_iter()
            .sorted_unstable()
            .dedup()
            .collect();

        let arrays = (0..self.arrays.len())
            .filter(|&i| changed_idx.iter().any(|&j| self.deps.is_adjacent(i, j)))
            .map(|i| self.arrays[i].id)
            .collect();

        Ok(UpdatePlan { arrays })
    }

    /// Recompute exactly the arrays affected by the changed parameters,
    /// writing values in place into the encoded buffers.
    ///
    /// Untouched arrays and all structural metadata (row indices, column
    /// pointers, shapes) are left bit-identical.   Repeating the call with
    /// the same changed set and values is idempotent.
    pub fn update(
        &mut self,
        changed: &[ParameterId],
        values: &ParameterValues<T>,
    ) -> Result<(), CanonError> {
        let plan = self.plan(changed)?;
        self.apply(&plan, values)
    }

    /// Apply a previously computed plan at the given parameter values.
    pub fn apply(&mut self, plan: &UpdatePlan, values: &ParameterValues<T>) -> Result<(), CanonError> {
        if plan.arrays.is_empty() {
            return Ok(());
        }

        let flat = self.params.flatten(values)?;
        for (array, data) in zip(&self.arrays, &mut self.data) {
            if plan.arrays.contains(&array.id) {
                array.refresh_into(&flat, data);
            }
        }
        Ok(())
    }
}
