#![allow(non_snake_case)]
use crate::algebra::{CscMatrix, FloatT, SparseFormatError};
use crate::canon::{CanonError, CanonicalArray, CanonicalArrayId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed sparsity structure of a matrix-shaped canonical array.
///
/// Row indices and column pointers are computed once at generation time and
/// never regenerated; per-solve updates touch values only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SparsityPattern {
    /// (rows, cols) of the encoded matrix
    pub shape: (usize, usize),
    /// row index of each structural nonzero, in column-major order
    pub rowval: Vec<usize>,
    /// column pointers; length `shape.1 + 1`
    pub colptr: Vec<usize>,
}

impl SparsityPattern {
    pub fn new(shape: (usize, usize), rowval: Vec<usize>, colptr: Vec<usize>) -> Self {
        Self {
            shape,
            rowval,
            colptr,
        }
    }

    /// number of structural nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr.last().copied().unwrap_or(0)
    }

    /// Check that the pattern arrays are correctly formatted.
    ///
    /// Column pointers must be non-decreasing and cover every column, so
    /// that structurally empty columns appear as repeated pointer values.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colptr.len() != self.shape.1 + 1
            || self.colptr.first() != Some(&0)
            || self.nnz() != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        for col in 0..self.shape.1 {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        if !self.rowval.iter().all(|r| *r < self.shape.0) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }
}

/// Values of one canonical array in the solver's native storage.
///
/// Matrix-shaped arrays carry the full compressed sparse-column triple;
/// vectors and scalars carry plain values.   In all cases only the values
/// change across solves.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalData<T = f64> {
    /// compressed sparse-column triple (values, row indices, column pointers)
    Matrix(CscMatrix<T>),
    Vector(Vec<T>),
    Scalar(T),
}

impl<T> CanonicalData<T>
where
    T: FloatT,
{
    /// the raw values buffer
    pub fn values(&self) -> &[T] {
        match self {
            CanonicalData::Matrix(M) => &M.nzval,
            CanonicalData::Vector(v) => v,
            CanonicalData::Scalar(s) => std::slice::from_ref(s),
        }
    }

    fn values_mut(&mut self) -> &mut [T] {
        match self {
            CanonicalData::Matrix(M) => &mut M.nzval,
            CanonicalData::Vector(v) => v,
            CanonicalData::Scalar(s) => std::slice::from_mut(s),
        }
    }
}

impl<T> CanonicalArray<T>
where
    T: FloatT,
{
    /// Produce the array's native encoding at the given flattened parameter
    /// vector.
    ///
    /// For matrix-shaped arrays this fixes the sparsity structure; the
    /// format checks run here, once.
    pub fn encode(&self, flat: &[T]) -> Result<CanonicalData<T>, CanonError> {
        let values = self.map.eval(flat);

        match &self.pattern {
            Some(pattern) => {
                pattern.check_format()?;
                if pattern.shape != self.shape || pattern.nnz() != values.len() {
                    return Err(CanonError::StructuralMismatch(
                        "sparsity pattern does not match the mapped value count",
                    ));
                }
                let M = CscMatrix::new(
                    pattern.shape.0,
                    pattern.shape.1,
                    pattern.colptr.clone(),
                    pattern.rowval.clone(),
                    values,
                );
                M.check_format()?;
                Ok(CanonicalData::Matrix(M))
            }
            // the cost offset is the only scalar array; every other
            // pattern-free array is a vector, length-one ones included
            None if self.id == CanonicalArrayId::CostOffset => {
                Ok(CanonicalData::Scalar(values[0]))
            }
            None => Ok(CanonicalData::Vector(values)),
        }
    }

    /// Re-evaluate the map and overwrite the encoding's values in place.
    ///
    /// Row indices, column pointers and shapes are left untouched.
    ///
    /// # Panics
    /// Panics if `data` was not produced by [`encode`](Self::encode) for
    /// this array.
    pub(crate) fn refresh_into(&self, flat: &[T], data: &mut CanonicalData<T>) {
        self.map.eval_into(flat, data.values_mut());
    }
}

// ---------- unit tests
