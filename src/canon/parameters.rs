use crate::algebra::{triangular_number, FloatT, VectorMath};
use crate::canon::CanonError;
use std::collections::BTreeMap;
use std::iter::zip;
use std::ops::Range;

/// Unique identifier for a user parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterId(pub usize);

/// A user-declared parameter of the source problem.
///
/// Records are immutable once a [`ParameterSpace`] is built.   Parameter
/// values live in a separate [`ParameterValues`] buffer keyed by id, so no
/// live parameter objects are shared with the caller.
#[derive(Debug, Clone)]
pub struct UserParameter {
    /// unique id, also fixing the parameter's position in the flattened vector
    pub id: ParameterId,
    /// user-facing name, unique within a parameter space
    pub name: String,
    /// (rows, cols) shape; scalars are (1, 1)
    pub shape: (usize, usize),
    /// symmetric / PSD / NSD parameters store upper-triangular entries only
    pub symmetric: bool,
}

impl UserParameter {
    /// A dense parameter, flattened column-major.
    pub fn new(id: usize, name: &str, shape: (usize, usize)) -> Self {
        Self {
            id: ParameterId(id),
            name: name.to_string(),
            shape,
            symmetric: false,
        }
    }

    /// A symmetric `n` × `n` parameter, stored by its upper triangle
    /// (column-wise).
    pub fn symmetric(id: usize, name: &str, n: usize) -> Self {
        Self {
            id: ParameterId(id),
            name: name.to_string(),
            shape: (n, n),
            symmetric: true,
        }
    }

    /// Number of entries this parameter occupies in the flattened vector.
    pub fn flat_size(&self) -> usize {
        if self.symmetric {
            triangular_number(self.shape.0)
        } else {
            self.shape.0 * self.shape.1
        }
    }
}

/// The ordered parameter list, with fixed column offsets into the flattened
/// parameter vector.
///
/// The flattened vector is the concatenation of all parameter values in
/// declaration order, followed by a single constant entry fixed at one.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    params: Vec<UserParameter>,
    offsets: Vec<usize>,
    total_size: usize,
}

impl ParameterSpace {
    /// Build the space, assigning each parameter its column range.
    ///
    /// Fails on duplicate ids or names, or on a symmetric parameter with a
    /// non-square shape.
    pub fn new(params: Vec<UserParameter>) -> Result<Self, CanonError> {
        for (i, p) in params.iter().enumerate() {
            if p.symmetric && p.shape.0 != p.shape.1 {
                return Err(CanonError::BadParameterList(
                    "symmetric parameter shape is not square",
                ));
            }
            for q in params.iter().take(i) {
                if p.id == q.id {
                    return Err(CanonError::BadParameterList("duplicate parameter id"));
                }
                if p.name == q.name {
                    return Err(CanonError::BadParameterList("duplicate parameter name"));
                }
            }
        }

        let mut offsets = Vec::with_capacity(params.len());
        let mut total_size = 0;
        for p in &params {
            offsets.push(total_size);
            total_size += p.flat_size();
        }

        Ok(Self {
            params,
            offsets,
            total_size,
        })
    }

    /// number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// true if no parameters are declared
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// iterate over the parameter records in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &UserParameter> {
        self.params.iter()
    }

    /// combined flat size of all parameters
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// flattened vector length, including the trailing constant entry
    pub fn flat_len(&self) -> usize {
        self.total_size + 1
    }

    /// the parameter record at position `idx`
    pub fn param(&self, idx: usize) -> &UserParameter {
        &self.params[idx]
    }

    /// column range of the parameter at position `idx`
    pub fn col_range(&self, idx: usize) -> Range<usize> {
        self.offsets[idx]..(self.offsets[idx] + self.params[idx].flat_size())
    }

    /// position of the parameter with the given id
    pub fn index_of(&self, id: ParameterId) -> Option<usize> {
        self.params.iter().position(|p| p.id == id)
    }

    /// Assemble the flattened parameter vector `[θ; 1]` from a values
    /// buffer.
    ///
    /// Every declared parameter must have a value of the correct flat size.
    pub fn flatten<T: FloatT>(&self, values: &ParameterValues<T>) -> Result<Vec<T>, CanonError> {
        let mut flat = vec![T::zero(); self.flat_len()];
        for (p, &offset) in zip(&self.params, &self.offsets) {
            let v = values
                .get(p.id)
                .ok_or(CanonError::MissingParameterValue(p.id))?;
            if v.len() != p.flat_size() {
                return Err(CanonError::BadParameterValue(p.id));
            }
            flat[offset..offset + v.len()].copy_from(v);
        }
        flat[self.total_size] = T::one();
        Ok(flat)
    }
}

/// Mutable parameter values, keyed by [`ParameterId`].
///
/// Matrix-shaped values are stored flattened column-major; symmetric
/// parameters store their upper triangle column-wise.
#[derive(Debug, Clone, Default)]
pub struct ParameterValues<T> {
    values: BTreeMap<ParameterId, Vec<T>>,
}

impl<T: FloatT> ParameterValues<T> {
    /// an empty values buffer
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Assign a (flattened) value to the parameter with the given id.
    pub fn set(&mut self, id: ParameterId, value: Vec<T>) {
        self.values.insert(id, value);
    }

    /// Current value of the parameter with the given id.
    pub fn get(&self, id: ParameterId) -> Option<&[T]> {
        self.values.get(&id).map(|v| v.as_slice())
    }
}

// ---------- unit tests
