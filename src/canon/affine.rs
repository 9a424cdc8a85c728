use crate::algebra::{CscMatrix, FloatT};
use crate::canon::formats::CanonicalArrayId;
use crate::canon::SparsityPattern;
use std::ops::Range;

/// Sparse affine map from the flattened parameter vector to the values of
/// one canonical array.
///
/// The map is a matrix `M` with one column per flattened parameter entry
/// plus a final constant column, so that `values = M · [θ; 1]`.   An
/// optional sentinel tail appends rows pinned at a constant value that
/// never varies with parameters, used for the infinite side of one-sided
/// bound vectors.
///
/// `M` depends only on problem structure, never on parameter values, so it
/// is computed once and reused for every later evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMap<T = f64> {
    /// the mapped (finite) part; columns = flattened vector length
    pub mat: CscMatrix<T>,
    sentinel_rows: usize,
    sentinel_value: T,
}

impl<T> AffineMap<T>
where
    T: FloatT,
{
    /// A map with no sentinel tail.
    pub fn new(mat: CscMatrix<T>) -> Self {
        Self {
            mat,
            sentinel_rows: 0,
            sentinel_value: T::zero(),
        }
    }

    /// A map whose output is the mapped part followed by `rows` constant
    /// entries equal to `value`.
    pub fn with_sentinel(mat: CscMatrix<T>, rows: usize, value: T) -> Self {
        Self {
            mat,
            sentinel_rows: rows,
            sentinel_value: value,
        }
    }

    /// Total output length, mapped rows plus sentinel rows.
    pub fn rows(&self) -> usize {
        self.mat.m + self.sentinel_rows
    }

    /// The sentinel tail as `(rows, value)`, if any.
    pub fn sentinel(&self) -> Option<(usize, T)> {
        if self.sentinel_rows > 0 {
            Some((self.sentinel_rows, self.sentinel_value))
        } else {
            None
        }
    }

    /// Evaluate the map at a flattened parameter vector, writing into `out`.
    ///
    /// # Panics
    /// Panics if `flat` or `out` have inconsistent lengths.
    pub fn eval_into(&self, flat: &[T], out: &mut [T]) {
        assert_eq!(out.len(), self.rows());
        assert_eq!(flat.len(), self.mat.n);

        let (head, tail) = out.split_at_mut(self.mat.m);
        self.mat.gemv(head, flat, T::one(), T::zero());
        tail.fill(self.sentinel_value);
    }

    /// Evaluate the map at a flattened parameter vector.
    pub fn eval(&self, flat: &[T]) -> Vec<T> {
        let mut out = vec![T::zero(); self.rows()];
        self.eval_into(flat, &mut out);
        out
    }

    /// True if the map has a structural entry outside the constant column.
    pub fn is_parametric(&self) -> bool {
        self.mat.colptr[self.mat.n - 1] > 0
    }

    /// True if the map has a structural entry in the given column range.
    pub fn intersects_cols(&self, cols: Range<usize>) -> bool {
        self.mat.cols_nonempty(cols)
    }
}

/// One solver data block: its affine map, fixed shape and sparsity
/// structure, and parameter-invariance flag.
///
/// Everything here is immutable after generation; only the encoded values
/// derived from the map are refreshed per solve.
#[derive(Debug, Clone)]
pub struct CanonicalArray<T = f64> {
    /// which solver data block this is
    pub id: CanonicalArrayId,
    /// target shape; vectors are (rows, 1), scalars (1, 1)
    pub shape: (usize, usize),
    /// the parameter-to-values map
    pub map: AffineMap<T>,
    /// fixed sparsity structure, present for matrix-shaped arrays
    pub pattern: Option<SparsityPattern>,
    /// false if the array depends only on the constant offset
    pub is_parametric: bool,
}

impl<T> CanonicalArray<T>
where
    T: FloatT,
{
    pub(crate) fn new(
        id: CanonicalArrayId,
        shape: (usize, usize),
        map: AffineMap<T>,
        pattern: Option<SparsityPattern>,
    ) -> Self {
        let is_parametric = map.is_parametric();
        Self {
            id,
            shape,
            map,
            pattern,
            is_parametric,
        }
    }
}

// ---------- unit tests
