//! Unoptimized triple-loop baselines.
//!
//! These are the reference oracles for the pipeline and the comparison
//! points for the benches. They place no divisibility requirement on `N`.

use crate::matrix::Matrix;
use crate::{Narrow, Wide, UNROLL};

/// Direct triple-loop product with wide (`i64`) accumulation.
///
/// The correctness oracle: `c[i][j] = Σ_k a[i][k] * b[k][j]`, exact.
pub fn matmul_naive<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
) -> Matrix<Wide, N> {
    let mut c = Matrix::zeros();
    for i in 0..N {
        let a_row = a.row(i);
        for j in 0..N {
            let mut sum: Wide = 0;
            for k in 0..N {
                sum += Wide::from(a_row[k]) * Wide::from(b[(k, j)]);
            }
            c[(i, j)] = sum;
        }
    }
    c
}

/// Direct triple-loop product with narrow (`i16`) wrapping accumulation.
///
/// Oracle for [`crate::matmult_narrow`]: the accumulator truncates to
/// input width on every step, two's-complement.
pub fn matmul_naive_narrow<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
) -> Matrix<Narrow, N> {
    let mut c = Matrix::zeros();
    for i in 0..N {
        let a_row = a.row(i);
        for j in 0..N {
            let mut sum: Narrow = 0;
            for k in 0..N {
                sum = sum.wrapping_add(a_row[k].wrapping_mul(b[(k, j)]));
            }
            c[(i, j)] = sum;
        }
    }
    c
}

/// Unrolled-only variant: the full-width k loop of [`matmul_naive`] run
/// with the same [`UNROLL`] accumulator lanes as a block product, but no
/// blocking and no concurrency. Produces results identical to
/// [`matmul_naive`] for every `N`, whether or not `UNROLL` divides it.
pub fn matmul_unrolled<const N: usize>(
    a: &Matrix<Narrow, N>,
    b: &Matrix<Narrow, N>,
) -> Matrix<Wide, N> {
    let mut c = Matrix::zeros();
    for i in 0..N {
        let a_row = a.row(i);
        for j in 0..N {
            let mut lanes = [0 as Wide; UNROLL];
            let mut k = 0;
            while k + UNROLL <= N {
                for (u, lane) in lanes.iter_mut().enumerate() {
                    *lane += Wide::from(a_row[k + u]) * Wide::from(b[(k + u, j)]);
                }
                k += UNROLL;
            }
            let mut sum: Wide = lanes.iter().sum();
            while k < N {
                sum += Wide::from(a_row[k]) * Wide::from(b[(k, j)]);
                k += 1;
            }
            c[(i, j)] = sum;
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_known_product() {
        let a: Matrix<i16, 2> = Matrix::from_rows([[1, 2], [3, 4]]);
        let b: Matrix<i16, 2> = Matrix::from_rows([[5, 6], [7, 8]]);

        let c = matmul_naive(&a, &b);
        assert_eq!(c, Matrix::from_rows([[19, 22], [43, 50]]));
    }

    #[test]
    fn test_unrolled_matches_naive_non_dividing_n() {
        // N = 6 is not a multiple of UNROLL = 4: the tail loop runs.
        let a: Matrix<i16, 6> =
            Matrix::from_vec((0..36).map(|x| x as i16 - 18).collect()).unwrap();
        let b: Matrix<i16, 6> =
            Matrix::from_vec((0..36).map(|x| (x as i16).wrapping_mul(7)).collect()).unwrap();

        assert_eq!(matmul_unrolled(&a, &b), matmul_naive(&a, &b));
    }
}
