//! Fixed-size square matrix storage.
//!
//! [`Matrix`] is an owned, heap-backed, row-major N×N grid. The dimension is
//! a const generic, so every matrix participating in one kernel invocation
//! is guaranteed at compile time to have the same shape: a dimension
//! mismatch is a type error, not a runtime check.

use std::fmt;
use std::ops::{Index, IndexMut};

use num::{One, Zero};

use crate::error::{Error, Result};

/// An N×N matrix of elements `T`, stored row-major in one contiguous
/// heap allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T, const N: usize> {
    data: Box<[T]>,
}

/// Calculates the flat index of element (i, j) in row-major order.
#[inline(always)]
pub(crate) const fn at<const N: usize>(i: usize, j: usize) -> usize {
    i * N + j
}

impl<T: Copy, const N: usize> Matrix<T, N> {
    /// Creates a matrix with every cell set to zero.
    pub fn zeros() -> Self
    where
        T: Zero,
    {
        Matrix {
            data: vec![T::zero(); N * N].into_boxed_slice(),
        }
    }

    /// Creates the identity matrix (ones on the diagonal, zeros elsewhere).
    pub fn identity() -> Self
    where
        T: Zero + One,
    {
        let mut m = Self::zeros();
        for i in 0..N {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Creates a matrix with every cell set to `value`.
    pub fn splat(value: T) -> Self {
        Matrix {
            data: vec![value; N * N].into_boxed_slice(),
        }
    }

    /// Creates a matrix from nested row arrays.
    pub fn from_rows(rows: [[T; N]; N]) -> Self {
        let mut data = Vec::with_capacity(N * N);
        for row in &rows {
            data.extend_from_slice(row);
        }
        Matrix {
            data: data.into_boxed_slice(),
        }
    }

    /// Creates a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `data` does not hold exactly
    /// N·N elements.
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.len() != N * N {
            return Err(Error::ShapeMismatch {
                expected: N * N,
                actual: data.len(),
            });
        }
        Ok(Matrix {
            data: data.into_boxed_slice(),
        })
    }

    /// Returns row `i` as a slice of N elements.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[at::<N>(i, 0)..at::<N>(i, 0) + N]
    }

    /// Returns the whole matrix as a flat row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the whole matrix as a mutable flat row-major slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Applies `f` to every cell, producing a matrix of the results.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Matrix<U, N> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }
}

impl<T, const N: usize> Index<(usize, usize)> for Matrix<T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[at::<N>(i, j)]
    }
}

impl<T, const N: usize> IndexMut<(usize, usize)> for Matrix<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[at::<N>(i, j)]
    }
}

/// Renders the matrix row by row as tab-separated values, one row per line.
/// Handy for eyeballing small results; not part of the kernel contract.
impl<T: fmt::Display, const N: usize> fmt::Display for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..N {
            let row = &self.data[i * N..(i + 1) * N];
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_identity() {
        let z: Matrix<i16, 3> = Matrix::zeros();
        assert!(z.as_slice().iter().all(|&x| x == 0));

        let i: Matrix<i16, 3> = Matrix::identity();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(i[(r, c)], if r == c { 1 } else { 0 });
            }
        }
    }

    #[test]
    fn test_from_rows_row_major_layout() {
        let m: Matrix<i16, 2> = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(m[(1, 0)], 3);
        assert_eq!(m.row(1), &[3, 4]);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Matrix::<i16, 4>::from_vec(vec![0; 12]).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: 16,
                actual: 12
            }
        );

        let ok = Matrix::<i16, 4>::from_vec(vec![7; 16]).unwrap();
        assert_eq!(ok[(3, 3)], 7);
    }

    #[test]
    fn test_display_tab_separated() {
        let m: Matrix<i16, 2> = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(format!("{}", m), "1\t2\n3\t4\n");
    }

    #[test]
    fn test_map_widens() {
        let m: Matrix<i16, 2> = Matrix::from_rows([[-1, 2], [3, -4]]);
        let w: Matrix<i64, 2> = m.map(i64::from);
        assert_eq!(w.as_slice(), &[-1, 2, 3, -4]);
    }
}
