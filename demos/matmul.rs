//! Small end-to-end demo: multiply two 4×4 matrices with the staged
//! pipeline and print the inputs and result tab-separated.
//!
//! ```bash
//! cargo run --example matmul
//! ```

use blockmm::naive::matmul_naive;
use blockmm::{matmult, matmult_narrow, Matrix};

fn main() {
    let a: Matrix<i16, 4> = Matrix::identity();
    let b: Matrix<i16, 4> = Matrix::from_rows([
        [1, 2, 3, 4],
        [5, 6, 7, 8],
        [9, 10, 11, 12],
        [13, 14, 15, 16],
    ]);

    println!("A:\n{}", a);
    println!("B:\n{}", b);

    let c = matmult(&a, &b);
    println!("C = A * B (pipeline, wide accumulator):\n{}", c);

    assert_eq!(c, matmul_naive(&a, &b));
    println!("pipeline output matches the naive baseline");

    // The narrow regime wraps once a cell's sum leaves i16 range.
    let big: Matrix<i16, 4> = Matrix::splat(181);
    println!(
        "splat(181)^2, narrow accumulator (wraps):\n{}",
        matmult_narrow(&big, &big)
    );
}
