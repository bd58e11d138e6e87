use log::debug;
use nalgebra::{DMatrix, DVector};

use super::balance_api::BalanceError;

/// pivot magnitudes below this are treated as zero
const PIVOT_TOL: f64 = 1e-10;
/// residual tolerance when scaling the free solution to integers
const SCALE_TOL: f64 = 1e-3;
/// largest multiplier tried when scaling to integers
const MAX_SCALE: u64 = 1000;

/// Least-squares solution of the (generally overdetermined) conservation
/// system: forms the normal equations A^T A x = A^T B and reduces them by
/// Gaussian elimination with partial pivoting. Coefficients are rounded to
/// four decimals so that repeated runs over equivalent inputs agree bit for
/// bit.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<Vec<f64>, BalanceError> {
    let at = a.transpose();
    let ata = &at * a;
    let atb = &at * b;
    debug!("normal equations: {}x{}", ata.nrows(), ata.ncols());
    let x = gaussian_elimination(ata, atb)?;
    Ok(x.iter().map(|v| round_coeff(*v)).collect())
}

fn gaussian_elimination(
    mut m: DMatrix<f64>,
    mut rhs: DVector<f64>,
) -> Result<DVector<f64>, BalanceError> {
    let n = m.nrows();
    for k in 0..n {
        // partial pivoting: bring the largest remaining magnitude to the diagonal
        let mut pivot_row = k;
        for i in (k + 1)..n {
            if m[(i, k)].abs() > m[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        if m[(pivot_row, k)].abs() < PIVOT_TOL {
            return Err(BalanceError::SingularSystem);
        }
        if pivot_row != k {
            m.swap_rows(k, pivot_row);
            rhs.swap_rows(k, pivot_row);
        }
        for i in (k + 1)..n {
            let factor = m[(i, k)] / m[(k, k)];
            for j in k..n {
                m[(i, j)] -= factor * m[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }
    // back substitution
    let mut x = DVector::zeros(n);
    for k in (0..n).rev() {
        let mut sum = rhs[k];
        for j in (k + 1)..n {
            sum -= m[(k, j)] * x[j];
        }
        x[k] = sum / m[(k, k)];
    }
    Ok(x)
}

fn round_coeff(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Rescales a free solution to the smallest whole-number ratio: tries
/// multipliers up to `MAX_SCALE`, takes the first one under which every
/// coefficient is within `SCALE_TOL` of an integer, then divides out the gcd.
/// Returns the input unchanged when no multiplier fits.
pub fn scale_to_integers(coeffs: &[f64]) -> Vec<f64> {
    for k in 1..=MAX_SCALE {
        let scaled: Vec<f64> = coeffs.iter().map(|c| c * k as f64).collect();
        if scaled.iter().all(|c| (c - c.round()).abs() < SCALE_TOL) {
            let ints: Vec<i64> = scaled.iter().map(|c| c.round() as i64).collect();
            let divisor = ints.iter().fold(0, |acc, v| gcd(acc, v.unsigned_abs()));
            if divisor > 1 {
                return ints.iter().map(|v| (*v / divisor as i64) as f64).collect();
            }
            return ints.iter().map(|v| *v as f64).collect();
        }
    }
    coeffs.to_vec()
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}
