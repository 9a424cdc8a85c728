use crate::algebra::{CscMatrix, FloatT, VectorMath};
use std::iter::zip;
use std::ops::Range;

impl<T: FloatT> CscMatrix<T> {
    /// Computes `y = a*A*x + b*y`.
    pub fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }

    /// Negate all nonzero values in place.
    pub fn negate(&mut self) {
        self.nzval.negate();
    }

    /// True if any structural nonzero lies in the given column range.
    pub fn cols_nonempty(&self, cols: Range<usize>) -> bool {
        assert!(cols.end <= self.n);
        self.colptr[cols.start] < self.colptr[cols.end]
    }
}

#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we are done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.n, x.len());
    assert_eq!(A.m, y.len());
    assert_eq!(A.colptr.len(), A.n + 1);

    //y += A*x
    for (col, &xcol) in x.iter().enumerate() {
        let first = A.colptr[col];
        let last = A.colptr[col + 1];
        let rows = &A.rowval[first..last];
        let nzvals = &A.nzval[first..last];

        for (&row, &Aij) in zip(rows, nzvals) {
            y[row] += a * Aij * xcol;
        }
    }
}

// ---------- unit tests

#[test]
#[allow(non_snake_case)]
fn test_gemv() {
    let A = CscMatrix::from(&[
        [1., 2., 0.], //
        [0., 3., 4.], //
    ]);
    let x = [1., -1., 2.];
    let mut y = [10., 10.];

    // y = 2*A*x + y
    A.gemv(&mut y, &x, 2., 1.);
    assert_eq!(y, [8., 20.]);

    // y = A*x
    A.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, [-1., 5.]);
}

#[test]
#[allow(non_snake_case)]
fn test_cols_nonempty() {
    let A = CscMatrix::from(&[
        [1., 0., 0.], //
        [0., 0., 2.], //
    ]);
    assert!(A.cols_nonempty(0..1));
    assert!(!A.cols_nonempty(1..2));
    assert!(A.cols_nonempty(1..3));
    assert!(!A.cols_nonempty(1..1));
}
