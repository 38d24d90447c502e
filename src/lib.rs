//! Blocked, fork-join integer matrix multiplication.
//!
//! This crate computes `C = A * B` for fixed-size N×N integer matrices by
//! splitting the contraction (k) dimension into [`BLOCK_COUNT`] disjoint
//! blocks, computing one partial product per block concurrently, and folding
//! the partials back together through a binary tree of element-wise merges.
//! The decomposition is lossless: the block ranges partition the k dimension
//! exactly, so summing the partials reproduces the full product.
//!
//! Concurrency is plain rayon fork-join. Every stage hands each task a
//! disjoint `&mut` slot of the partial buffer, so no stage needs a lock;
//! the borrow checker is the non-aliasing proof.
//!
//! ## Usage
//!
//! ```
//! use blockmm::{matmult, Matrix};
//!
//! let a: Matrix<i16, 4> = Matrix::identity();
//! let b = Matrix::from_rows([
//!     [1, 2, 3, 4],
//!     [5, 6, 7, 8],
//!     [9, 10, 11, 12],
//!     [13, 14, 15, 16],
//! ]);
//!
//! let c = matmult(&a, &b);
//! assert_eq!(c[(2, 1)], 10);
//! ```
//!
//! ## Numeric regimes
//!
//! Two accumulator widths exist, and they are deliberately not equivalent:
//!
//! - [`matmult`] accumulates in [`Wide`] (`i64`) and is exact for any `i16`
//!   inputs: a worst-case cell sum is N * 2^30, far inside `i64` range for
//!   any representable N. This is the canonical semantics.
//! - [`matmult_narrow`] accumulates in [`Narrow`] (`i16`) with
//!   two's-complement wrapping at every step, reproducing the behavior of a
//!   hardware build that keeps the accumulator at input width.
//!
//! ## What's inside
//!
//! - [`block::block_product`]: one partial product over a k-block, with an
//!   unrolled multi-lane inner reduction
//! - [`block::pair_merge`]: element-wise matrix addition
//! - [`pipeline`]: the staged kernel (4-way fan-out, two merge levels)
//! - [`naive`]: triple-loop baselines used as oracles and bench references

pub mod block;
pub mod error;
pub mod matrix;
pub mod naive;
pub mod pipeline;

pub use error::{Error, Result};
pub use matrix::Matrix;
pub use pipeline::{matmult, matmult_narrow};

/// Input element type, matching the narrow-accumulator hardware baseline.
pub type Narrow = i16;

/// Accumulator type for the canonical (overflow-free) kernel.
///
/// Wide enough that a full contraction of `i16` products cannot wrap:
/// the worst-case cell magnitude is N * 2^15 * 2^15 = N * 2^30, which an
/// `i32` already overflows at N = 2.
pub type Wide = i64;

/// Number of k-blocks computed concurrently in the fan-out stage.
pub const BLOCK_COUNT: usize = 4;

/// Unroll factor for the inner reduction loop of a block product.
///
/// A resource/latency trade-off, not a correctness parameter: any factor
/// produces identical results (non-dividing remainders are handled by a
/// tail loop).
pub const UNROLL: usize = 4;

// The merge tree reduces the fan-out outputs pairwise.
const _: () = assert!(BLOCK_COUNT.is_power_of_two());
const _: () = assert!(UNROLL >= 1);
