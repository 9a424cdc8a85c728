use crate::algebra::FloatT;
use crate::canon::formats::CanonicalArrayId;
use crate::canon::{CanonicalArray, ParameterSpace};

/// Boolean adjacency between canonical arrays and user parameters, plus the
/// per-parameter outdated sets derived from it.
///
/// An (array, parameter) pair is adjacent iff the array's affine map has a
/// structural nonzero inside the parameter's column block.   The
/// computation is solver-agnostic: it runs identically over the arrays of
/// either canonical layout.
#[derive(Debug, Clone)]
pub struct DependencyTable {
    n_params: usize,
    adjacency: Vec<bool>,
    outdated: Vec<Vec<CanonicalArrayId>>,
}

impl DependencyTable {
    /// Analyze the built maps once, at generation time.
    pub fn analyze<T: FloatT>(arrays: &[CanonicalArray<T>], params: &ParameterSpace) -> Self {
        let n_params = params.len();
        let mut adjacency = vec![false; arrays.len() * n_params];

        for (i, array) in arrays.iter().enumerate() {
            // an array depending only on the constant offset is valued once
            // at generation time and belongs to no outdated set
            if !array.is_parametric {
                continue;
            }
            for j in 0..n_params {
                adjacency[i * n_params + j] = array.map.intersects_cols(params.col_range(j));
            }
        }

        let outdated = (0..n_params)
            .map(|j| {
                arrays
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| adjacency[i * n_params + j])
                    .map(|(_, array)| array.id)
                    .collect()
            })
            .collect();

        Self {
            n_params,
            adjacency,
            outdated,
        }
    }

    /// True if the array at position `array_idx` depends on the parameter
    /// at position `param_idx`.
    pub fn is_adjacent(&self, array_idx: usize, param_idx: usize) -> bool {
        assert!(param_idx < self.n_params);
        self.adjacency[array_idx * self.n_params + param_idx]
    }

    /// The canonical arrays to recompute when the parameter at position
    /// `param_idx` changes, in layout order.
    pub fn outdated(&self, param_idx: usize) -> &[CanonicalArrayId] {
        &self.outdated[param_idx]
    }
}

// ---------- unit tests
