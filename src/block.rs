//! Leaf kernels of the pipeline: block partial products and pair merges.
//!
//! [`block_product`] computes the contribution of one contiguous slice of
//! the contraction dimension. The slices `[blk_id * blk_dim, (blk_id + 1)
//! * blk_dim)` are pairwise disjoint and cover the k dimension exactly once
//! across all [`BLOCK_COUNT`] block ids, which is what makes the four block
//! computations data-independent: no two of them touch the same k-range of
//! `A`'s columns or `B`'s rows, and each writes its own output matrix.
//!
//! [`pair_merge`] is the reduction step: a plain element-wise add with no
//! cross-iteration dependency, so it compiles to a fully pipelined sweep.
//!
//! Both kernels come in two numeric regimes, wide (`i64` accumulation,
//! exact) and narrow (`i16` wrapping accumulation, matching the
//! input-width hardware baseline); see the crate docs.

use crate::matrix::Matrix;
use crate::{Narrow, Wide, BLOCK_COUNT, UNROLL};

/// Compile-time divisibility check, evaluated when a kernel is
/// instantiated at some `N`.
pub(crate) struct BlockShape<const N: usize>;

impl<const N: usize> BlockShape<N> {
    pub(crate) const DIVIDES: () = assert!(
        N % BLOCK_COUNT == 0,
        "BLOCK_COUNT must divide the matrix dimension N evenly"
    );
}

/// Computes one partial product over the k-block `blk_id`:
///
/// `bc[i][j] = Σ a[i][k] * b[k][j]` for `k` in
/// `[blk_id * blk_dim, (blk_id + 1) * blk_dim)`, `blk_dim = N / BLOCK_COUNT`.
///
/// Accumulation is widened to `i64`, so the partial sum is exact for any
/// `i16` inputs. The inner reduction runs [`UNROLL`] independent
/// accumulator lanes to break the loop-carried dependency chain; a tail
/// loop keeps the result identical when the unroll factor does not divide
/// `blk_dim`.
///
/// # Panics
///
/// Debug builds assert `blk_id < BLOCK_COUNT`.
pub fn block_product<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
    bc: &mut Matrix<Wide, N>,
    blk_id: usize,
) {
    let () = BlockShape::<N>::DIVIDES;
    debug_assert!(blk_id < BLOCK_COUNT);

    let blk_dim = N / BLOCK_COUNT;
    let start = blk_id * blk_dim;
    let end = start + blk_dim;

    for i in 0..N {
        let a_row = a.row(i);
        for j in 0..N {
            let mut lanes = [0 as Wide; UNROLL];
            let mut k = start;
            while k + UNROLL <= end {
                for (u, lane) in lanes.iter_mut().enumerate() {
                    *lane += Wide::from(a_row[k + u]) * Wide::from(b[(k + u, j)]);
                }
                k += UNROLL;
            }
            let mut sum: Wide = lanes.iter().sum();
            while k < end {
                sum += Wide::from(a_row[k]) * Wide::from(b[(k, j)]);
                k += 1;
            }
            bc[(i, j)] = sum;
        }
    }
}

/// Narrow-accumulator variant of [`block_product`].
///
/// The accumulator stays at input width and wraps two's-complement on every
/// step, bit-exact with a hardware build that never widens. Because
/// wrapping arithmetic is mod-2¹⁶ ring arithmetic, splitting the sum into
/// lanes and blocks does not change the wrapped result.
pub fn block_product_narrow<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
    bc: &mut Matrix<Narrow, N>,
    blk_id: usize,
) {
    let () = BlockShape::<N>::DIVIDES;
    debug_assert!(blk_id < BLOCK_COUNT);

    let blk_dim = N / BLOCK_COUNT;
    let start = blk_id * blk_dim;
    let end = start + blk_dim;

    for i in 0..N {
        let a_row = a.row(i);
        for j in 0..N {
            let mut lanes = [0 as Narrow; UNROLL];
            let mut k = start;
            while k + UNROLL <= end {
                for (u, lane) in lanes.iter_mut().enumerate() {
                    *lane = lane.wrapping_add(a_row[k + u].wrapping_mul(b[(k + u, j)]));
                }
                k += UNROLL;
            }
            let mut sum = lanes
                .iter()
                .fold(0 as Narrow, |acc, &lane| acc.wrapping_add(lane));
            while k < end {
                sum = sum.wrapping_add(a_row[k].wrapping_mul(b[(k, j)]));
                k += 1;
            }
            bc[(i, j)] = sum;
        }
    }
}

/// Element-wise matrix addition: `bc[i][j] = ba[i][j] + bb[i][j]`.
///
/// Each output cell depends only on the same-position inputs, so the sweep
/// has no cross-iteration dependency. Merged partial sums of `i16` products
/// stay far inside `i64` range (see [`crate::matmult`]), so the wide merge
/// uses plain addition.
pub fn pair_merge<const N: usize>(
    ba: &Matrix<Wide, N>,
    bb: &Matrix<Wide, N>,
    bc: &mut Matrix<Wide, N>,
) {
    for ((c, &x), &y) in bc
        .as_mut_slice()
        .iter_mut()
        .zip(ba.as_slice())
        .zip(bb.as_slice())
    {
        *c = x + y;
    }
}

/// Narrow-accumulator variant of [`pair_merge`]: wrapping element-wise add.
pub fn pair_merge_narrow<const N: usize>(
    ba: &Matrix<Narrow, N>,
    bb: &Matrix<Narrow, N>,
    bc: &mut Matrix<Narrow, N>,
) {
    for ((c, &x), &y) in bc
        .as_mut_slice()
        .iter_mut()
        .zip(ba.as_slice())
        .zip(bb.as_slice())
    {
        *c = x.wrapping_add(y);
    }
}
