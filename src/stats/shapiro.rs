//! Shapiro-Wilk normality test.
//!
//! Coefficients and p-values follow Royston (1995), "A remark on algorithm AS
//! 181: the W-test for normality" (AS R94): polynomial approximations for the
//! two extreme coefficients, scaled normal scores for the rest, and a
//! normalizing transform of `1 - W` for the p-value.

use crate::error::AppError;
use crate::math::normal;

/// Test outcome: statistic `W` in `(0, 1]` and its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub w: f64,
    pub p_value: f64,
}

const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.382_2, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.586_1, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.480_3, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Relative range below which a sample is treated as constant.
const SMALL: f64 = 1e-19;

/// Largest sample the p-value approximation is calibrated for.
pub const MAX_ACCURATE_N: usize = 5000;

/// `c[0] + c[1] x + c[2] x^2 + ...`
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Run the test on a sample (order does not matter; NaNs are rejected).
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk, AppError> {
    let n = sample.len();
    if n < 3 {
        return Err(AppError::compute(format!(
            "Shapiro-Wilk needs at least 3 observations, got {n}."
        )));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(AppError::compute("Shapiro-Wilk sample contains non-finite values."));
    }
    if n > MAX_ACCURATE_N {
        log::warn!("Shapiro-Wilk p-value may be inaccurate for n > {MAX_ACCURATE_N} (n = {n})");
    }

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let range = x[n - 1] - x[0];
    if range <= SMALL * x[0].abs().max(1.0) {
        log::warn!("Shapiro-Wilk input has zero range; reporting W = 1, p = 1");
        return Ok(ShapiroWilk { w: 1.0, p_value: 1.0 });
    }

    let a = coefficients(n);
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();

    let w = (numerator * numerator / ss).clamp(0.0, 1.0);
    Ok(ShapiroWilk {
        w,
        p_value: p_value(w, n),
    })
}

/// Positive half of the antisymmetric coefficient vector, largest first.
///
/// Normalized so that `2 * Σ a_i^2 == 1`.
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an25 = n as f64 + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal::quantile((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };

    for i in first_scaled..half {
        a[i] = -m[i] / fac;
    }
    a
}

fn p_value(w: f64, n: usize) -> f64 {
    let an = n as f64;
    if n == 3 {
        const PI6: f64 = 6.0 / std::f64::consts::PI;
        const STQR: f64 = std::f64::consts::FRAC_PI_3;
        return (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    let (y, m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        (-(gamma - y).ln(), poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (y, poly(&C5, xx), poly(&C6, xx).exp())
    };

    normal::sf((y - m) / s)
}
