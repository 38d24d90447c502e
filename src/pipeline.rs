//! The staged multiplication pipeline.
//!
//! One invocation runs a static dependency DAG:
//!
//! ```text
//! A, B ──► block_product ×4 (concurrent) ──► slots 0..4
//!          pair_merge 0+1 → 4, 2+3 → 5   (concurrent)
//!          pair_merge 4+5 → C
//! ```
//!
//! The fan-out uses `rayon::scope` (the scope exit is the barrier before
//! the first merge level), the two level-2a merges run under `rayon::join`,
//! and the final merge writes the caller-visible output. `A` and `B` are
//! shared borrows read lock-free by all four products; every concurrent
//! task owns a disjoint `&mut` slot of the partial buffer, handed out
//! through `iter_mut`/`split_at_mut`, so the non-aliasing the stages rely
//! on is checked at compile time rather than at runtime.

use crate::block::{
    block_product, block_product_narrow, pair_merge, pair_merge_narrow, BlockShape,
};
use crate::matrix::Matrix;
use crate::{Narrow, Wide, BLOCK_COUNT};

/// Partial-buffer slots: one per block product plus one per first-level
/// merge. Slots 0..BLOCK_COUNT hold level-1 outputs, the rest level-2a.
const SLOTS: usize = BLOCK_COUNT + BLOCK_COUNT / 2;

const _: () = assert!(SLOTS == 6);

/// Computes the matrix product `C = A * B` with wide (`i64`) accumulation.
///
/// This is the canonical semantics: the result equals the direct
/// triple-sum definition `C[i][j] = Σ_k A[i][k] * B[k][j]` exactly, for
/// any `i16` inputs. The pipeline sums exactly `N` products into each
/// cell, so the worst-case magnitude is `N * 2^15 * 2^15 = N * 2^30`,
/// which cannot wrap the accumulator for any representable `N`.
///
/// The contraction dimension must divide evenly into [`BLOCK_COUNT`]
/// blocks; an `N` that violates this fails to compile.
pub fn matmult<const N: usize>(a: &Matrix<Narrow, N>, b: &Matrix<Narrow, N>) -> Matrix<Wide, N> {
    let () = BlockShape::<N>::DIVIDES;

    let mut buf: Vec<Matrix<Wide, N>> = (0..SLOTS).map(|_| Matrix::zeros()).collect();
    let (partials, merged) = buf.split_at_mut(BLOCK_COUNT);

    // Level 1: fan out one block product per k-block. The scope joins all
    // four before any merge reads a slot.
    rayon::scope(|s| {
        for (blk_id, slot) in partials.iter_mut().enumerate() {
            s.spawn(move |_| block_product(a, b, slot, blk_id));
        }
    });

    // Level 2a: adjacent-index pairing, disjoint reads and writes.
    let partials = &*partials;
    let (lo, hi) = merged.split_at_mut(1);
    rayon::join(
        || pair_merge(&partials[0], &partials[1], &mut lo[0]),
        || pair_merge(&partials[2], &partials[3], &mut hi[0]),
    );

    // Level 2b: final merge into the caller-visible output.
    let mut c = Matrix::zeros();
    pair_merge(&merged[0], &merged[1], &mut c);
    c
}

/// Computes `C = A * B` with narrow (`i16`) wrapping accumulation.
///
/// Same pipeline as [`matmult`], but the accumulator stays at input width
/// and wraps two's-complement, reproducing the resource-constrained
/// hardware baseline bit for bit. For inputs whose true product fits
/// `i16` the result matches [`matmult`]; otherwise it diverges by design.
pub fn matmult_narrow<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
) -> Matrix<Narrow, N> {
    let () = BlockShape::<N>::DIVIDES;

    let mut buf: Vec<Matrix<Narrow, N>> = (0..SLOTS).map(|_| Matrix::zeros()).collect();
    let (partials, merged) = buf.split_at_mut(BLOCK_COUNT);

    rayon::scope(|s| {
        for (blk_id, slot) in partials.iter_mut().enumerate() {
            s.spawn(move |_| block_product_narrow(a, b, slot, blk_id));
        }
    });

    let partials = &*partials;
    let (lo, hi) = merged.split_at_mut(1);
    rayon::join(
        || pair_merge_narrow(&partials[0], &partials[1], &mut lo[0]),
        || pair_merge_narrow(&partials[2], &partials[3], &mut hi[0]),
    );

    let mut c = Matrix::zeros();
    pair_merge_narrow(&merged[0], &merged[1], &mut c);
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmult_blk_dim_one() {
        // N = BLOCK_COUNT: each block product is a single rank-1 term.
        let a: Matrix<i16, 4> = Matrix::from_rows([
            [2, 0, 0, 0],
            [0, 2, 0, 0],
            [0, 0, 2, 0],
            [0, 0, 0, 2],
        ]);
        let b: Matrix<i16, 4> = Matrix::from_rows([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 16],
        ]);

        let c = matmult(&a, &b);
        assert_eq!(c, b.map(|x| 2 * i64::from(x)));
    }

    #[test]
    fn test_matmult_narrow_matches_wide_in_range() {
        let a: Matrix<i16, 8> = Matrix::splat(3);
        let b: Matrix<i16, 8> = Matrix::splat(7);

        let wide = matmult(&a, &b);
        let narrow = matmult_narrow(&a, &b);
        assert_eq!(narrow.map(i64::from), wide);
    }
}
