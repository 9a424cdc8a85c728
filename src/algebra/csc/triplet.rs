use crate::algebra::{CscMatrix, FloatT};

/// Accumulator for sparse matrix entries in (row, column, value) triplet
/// form.
///
/// Entries may be pushed in any order and converted to compressed sparse
/// column format with a single sort-and-compress pass.   Entries sharing a
/// (row, column) coordinate are summed during compression.
#[derive(Debug, Clone)]
pub struct TripletMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    rowval: Vec<usize>,
    colval: Vec<usize>,
    nzval: Vec<T>,
}

impl<T> TripletMatrix<T>
where
    T: FloatT,
{
    /// an empty accumulator with the given dimensions
    pub fn new(size: (usize, usize)) -> Self {
        Self::with_capacity(size, 0)
    }

    /// an empty accumulator with space reserved for `nnz` entries
    pub fn with_capacity(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        Self {
            m,
            n,
            rowval: Vec::with_capacity(nnz),
            colval: Vec::with_capacity(nnz),
            nzval: Vec::with_capacity(nnz),
        }
    }

    /// number of entries pushed so far, counting duplicates
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// record the entry `(row, col, val)`
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    pub fn push(&mut self, row: usize, col: usize, val: T) {
        assert!(row < self.m && col < self.n);
        self.rowval.push(row);
        self.colval.push(col);
        self.nzval.push(val);
    }

    /// Compress to CSC format, sorting entries by (column, row) and summing
    /// duplicates.
    pub fn to_csc(self) -> CscMatrix<T> {
        let (m, n) = (self.m, self.n);

        let mut perm: Vec<usize> = (0..self.nzval.len()).collect();
        perm.sort_unstable_by_key(|&k| (self.colval[k], self.rowval[k]));

        let mut colptr = vec![0; n + 1];
        let mut rowval = Vec::with_capacity(perm.len());
        let mut nzval: Vec<T> = Vec::with_capacity(perm.len());

        let mut prev: Option<(usize, usize)> = None;
        for &k in &perm {
            let (r, c) = (self.rowval[k], self.colval[k]);
            match prev {
                Some(coord) if coord == (r, c) => {
                    // unwrap is fine since a duplicate implies a prior entry
                    *nzval.last_mut().unwrap() += self.nzval[k];
                }
                _ => {
                    rowval.push(r);
                    nzval.push(self.nzval[k]);
                    colptr[c + 1] += 1;
                    prev = Some((r, c));
                }
            }
        }

        // convert per-column counts to pointers
        for c in 0..n {
            colptr[c + 1] += colptr[c];
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }
}

// ---------- unit tests

#[test]
fn test_triplet_compress() {
    let mut t = TripletMatrix::with_capacity((3, 4), 4);
    t.push(2, 3, 4.);
    t.push(0, 0, 1.);
    t.push(2, 0, 3.);
    t.push(0, 3, 2.);

    let A = t.to_csc();
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 2, 2, 2, 4]); //column 1 and 2 are empty
    assert_eq!(A.rowval, vec![0, 2, 0, 2]);
    assert_eq!(A.nzval, vec![1., 3., 2., 4.]);
}

#[test]
fn test_triplet_duplicates_are_summed() {
    let mut t = TripletMatrix::new((2, 2));
    t.push(1, 1, 1.);
    t.push(1, 1, 2.5);
    t.push(0, 1, -1.);

    let A = t.to_csc();
    assert_eq!(A.nnz(), 2);
    assert_eq!(A.get_entry((1, 1)), Some(3.5));
    assert_eq!(A.get_entry((0, 1)), Some(-1.));
}

#[test]
fn test_triplet_empty() {
    let t = TripletMatrix::<f64>::new((3, 2));
    let A = t.to_csc();
    assert_eq!(A.size(), (3, 2));
    assert_eq!(A.nnz(), 0);
    assert_eq!(A.colptr, vec![0, 0, 0]);
    assert!(A.check_format().is_ok());
}
