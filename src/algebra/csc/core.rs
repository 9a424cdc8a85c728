#![allow(non_snake_case)]

use crate::algebra::{FloatT, SparseFormatError, TripletMatrix};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use canongen::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// This field should have length `n+1`. The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that row indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }
    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }
    /// dimensions as a `(rows, cols)` tuple
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }
    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }

    /// Re-index the rows of a sparse matrix through `rowmap`, producing a
    /// matrix with `m_out` rows.
    ///
    /// Source row `r` lands on row `rowmap[r]`; rows mapped to `None` are
    /// dropped.   Entries landing on the same destination are summed.  Used
    /// for both row selection (compacting maps) and row scatter (placing
    /// data entries at their structural row index).
    ///
    /// # Panics
    /// Panics if `rowmap` is shorter than the row count or maps a row out
    /// of bounds.
    pub fn gather_rows(&self, rowmap: &[Option<usize>], m_out: usize) -> Self {
        assert_eq!(rowmap.len(), self.m);

        let mut triplets = TripletMatrix::with_capacity((m_out, self.n), self.nnz());
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                if let Some(dest) = rowmap[self.rowval[ptr]] {
                    triplets.push(dest, col, self.nzval[ptr]);
                }
            }
        }
        triplets.to_csc()
    }
}

impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for CscMatrix<T>
where
    T: FloatT,
{
    /// Build a `CscMatrix` from a dense array of arrays, dropping zeros.
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut triplets = TripletMatrix::new((R, C));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v != T::zero() {
                    triplets.push(i, j, v);
                }
            }
        }
        triplets.to_csc()
    }
}

// ---------- unit tests

#[test]
fn test_csc_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((3, 2)).unwrap(), 10.);
    assert_eq!(A.get_entry((4, 4)).unwrap(), 14.);
    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((2, 3)).is_none());
}

#[test]
fn test_csc_from_dense() {
    let A = CscMatrix::from(&[
        [1., 0., 3.], //
        [0., 2., 0.], //
    ]);
    assert_eq!(A.size(), (2, 3));
    assert_eq!(A.colptr, vec![0, 1, 2, 3]);
    assert_eq!(A.rowval, vec![0, 1, 0]);
    assert_eq!(A.nzval, vec![1., 2., 3.]);
    assert!(A.check_format().is_ok());
}

#[test]
fn test_csc_gather_rows() {
    let A = CscMatrix::from(&[
        [1., 0.], //
        [2., 4.], //
        [3., 0.], //
    ]);

    // keep rows 0 and 2, reversing their order
    let B = A.gather_rows(&[Some(1), None, Some(0)], 2);
    assert_eq!(B.size(), (2, 2));
    assert_eq!(B.get_entry((1, 0)), Some(1.));
    assert_eq!(B.get_entry((0, 0)), Some(3.));
    assert!(B.get_entry((0, 1)).is_none());

    // collapse all rows onto row 0, summing entries
    let C = A.gather_rows(&[Some(0), Some(0), Some(0)], 1);
    assert_eq!(C.get_entry((0, 0)), Some(6.));
    assert_eq!(C.get_entry((0, 1)), Some(4.));
}
