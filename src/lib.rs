//! __canongen__ is a parametric canonicalization engine for convex
//! optimization code generation.   Given a problem already reduced to a set
//! of sparse coefficient matrices that are affine functions of a flattened
//! parameter vector, it derives the data a generated native solver needs to
//! re-solve repeatedly for new parameter values without re-deriving the
//! problem's structure each time:
//!
//! * per solver data block ("canonical array"), the exact sparse affine map
//!   from parameters to that block's values,
//! * the block's compressed sparse-column structure, fixed once,
//! * per-parameter "outdated sets" recording which blocks a parameter
//!   change invalidates, and
//! * the per-solve update contract: recompute exactly the outdated blocks,
//!   writing values in place, leaving structure untouched.
//!
//! Two canonical layouts are supported and selected once at generation
//! time: a quadratic-program layout (cost matrix/vector/offset, constraint
//! matrix, lower/upper bounds) and a conic layout (cost vector/offset,
//! equality and cone constraint blocks).
//!
//! The engine neither models problems nor solves them: the upstream
//! reduction layer supplies [`canon::ReducedProblem`], and the generated
//! [`canon::Canonicalizer`] feeds a downstream code emitter through
//! [`canon::CanonArtifact`].

pub mod algebra;
pub mod canon;
