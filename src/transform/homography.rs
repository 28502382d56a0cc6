//! Projective transform from four point correspondences.
//!
//! With `m33` fixed to 1 the eight remaining coefficients satisfy, for every pair
//! `(x, y) -> (X, Y)`:
//!
//! ```text
//! m11*x + m12*y + m13 - m31*x*X - m32*y*X = X
//! m21*x + m22*y + m23 - m31*x*Y - m32*y*Y = Y
//! ```
//!
//! The 8x9 augmented system is solved by Gaussian elimination with row equilibration and
//! partial pivoting. Columns whose best pivot is below [`PIVOT_EPS`] are skipped, leaving the
//! corresponding coefficient at zero; degenerate quads therefore produce a degenerate (but
//! finite) matrix instead of a failure.

use crate::foundation::core::Point;
use crate::transform::mat::Mat;

const N: usize = 8;
const M: usize = N + 1;

/// Magnitude below which a pivot or a row is treated as zero.
pub const PIVOT_EPS: f64 = 1e-8;

type System = [[f64; M]; N];

/// Solve the projective transform mapping each `src[i]` onto `dst[i]`.
///
/// The returned matrix has `m33 == 1`; apply it with [`Mat::map_perspective`].
pub fn solve_homography(src: &[Point; 4], dst: &[Point; 4]) -> Mat {
    let mut a = build_system(src, dst);
    equilibrate_rows(&mut a);
    forward_eliminate(&mut a);
    let x = back_substitute(&a);
    Mat::new([x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], 1.0])
}

fn build_system(src: &[Point; 4], dst: &[Point; 4]) -> System {
    let mut a = [[0.0; M]; N];
    for (i, (s, d)) in src.iter().zip(dst).enumerate() {
        a[i] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -s.x * d.x, -s.y * d.x, d.x];
        a[i + 4] = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -s.x * d.y, -s.y * d.y, d.y];
    }
    a
}

/// Divide every row by its largest absolute entry.
fn equilibrate_rows(a: &mut System) {
    for row in a.iter_mut() {
        let max = row.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if max < PIVOT_EPS {
            continue;
        }
        for v in row.iter_mut() {
            *v /= max;
        }
    }
}

/// Reduce to row-echelon form with unit pivots.
fn forward_eliminate(a: &mut System) {
    let mut row = 0;
    for col in 0..N {
        let (pivot, max) = (row..N)
            .map(|r| (r, a[r][col].abs()))
            .fold((row, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });
        if max < PIVOT_EPS {
            continue;
        }
        a.swap(row, pivot);

        let p = a[row][col];
        for v in &mut a[row][col + 1..] {
            *v /= p;
        }
        a[row][col] = 1.0;

        for r in row + 1..N {
            let f = a[r][col];
            if f != 0.0 {
                for k in col + 1..M {
                    a[r][k] -= f * a[row][k];
                }
            }
            a[r][col] = 0.0;
        }
        row += 1;
    }
}

/// Solve the echelon system bottom-up. Rows without a usable leading entry are skipped and
/// unsolved unknowns stay at zero.
fn back_substitute(a: &System) -> [f64; N] {
    let mut x = [0.0; N];
    for row in a.iter().rev() {
        let Some(lead) = row[..N].iter().position(|v| v.abs() >= PIVOT_EPS) else {
            continue;
        };
        x[lead] = row[N] - (lead + 1..N).map(|k| row[k] * x[k]).sum::<f64>();
    }
    x
}

#[cfg(test)]
#[path = "../../tests/unit/transform/homography.rs"]
mod tests;
