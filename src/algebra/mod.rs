//! Sparse linear algebra primitives for the canonicalization engine.
//!
//! All matrix data handled by the engine is kept in standard compressed
//! sparse column format ([`CscMatrix`]), with a triplet accumulator
//! ([`TripletMatrix`]) for assembling matrices whose entries arrive in
//! arbitrary row order.

mod error_types;
pub use error_types::*;
mod floats;
pub use floats::*;
mod vecmath;
pub use vecmath::*;
mod csc;
pub use csc::*;

/// Number of entries on or above the diagonal of a `k` × `k` matrix.
pub fn triangular_number(k: usize) -> usize {
    (k * (k + 1)) >> 1
}

#[test]
fn test_triangular_number() {
    assert_eq!(triangular_number(1), 1);
    assert_eq!(triangular_number(3), 6);
}
