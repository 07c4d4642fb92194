//! Closed-form approximations of the F distribution.
//!
//! Neither function evaluates the F distribution exactly. Both are cheap
//! approximations intended for illustrative output, and both are known to
//! misbehave for extreme inputs. Their results are returned as-is.

use crate::special::beta;

/// Significance level of the "significant" threshold.
pub const ALPHA_05: f64 = 0.05;

/// Significance level of the "highly significant" threshold.
pub const ALPHA_01: f64 = 0.01;

/// Textbook F-critical value shown next to the α = 0.05 approximation.
pub const TEXTBOOK_F_CRITICAL_05: f64 = 3.10;

/// Textbook F-critical value shown next to the α = 0.01 approximation.
pub const TEXTBOOK_F_CRITICAL_01: f64 = 5.14;

/// Number of terms summed by [`p_value`]. There is no convergence check.
pub const P_VALUE_SERIES_TERMS: u32 = 100;

/// Approximates the upper-tail p-value of an F statistic.
///
/// With `x = df2 / (df2 + df1·F)`, `a = df2 / 2` and `b = df1 / 2`, the
/// regularized incomplete beta function is approximated by a power series
/// truncated at [`P_VALUE_SERIES_TERMS`] terms:
///
/// ```text
/// p = x^a · (1 − x)^b · Σ term_i / (a · B(a, b))
/// ```
///
/// # Returns
///
/// `f64::NAN` if `f_value` is zero, negative or NaN. Otherwise the value of
/// the series, which may lie outside `[0, 1]` or diverge for extreme inputs.
///
/// # Examples
///
/// ```
/// # use ral_stats::distribution::p_value;
/// let p = p_value(16.0, 2.0, 3.0);
/// assert!((p - 0.121_236).abs() < 1e-6);
/// assert!(p_value(0.0, 2.0, 3.0).is_nan());
/// ```
#[must_use]
pub fn p_value(f_value: f64, df1: f64, df2: f64) -> f64 {
    if f_value.is_nan() || f_value <= 0.0 {
        return f64::NAN;
    }

    let x = df2 / (df2 + df1 * f_value);
    let a = df2 / 2.0;
    let b = df1 / 2.0;

    let mut term = 1.0;
    let mut sum = 1.0;
    for i in 0..P_VALUE_SERIES_TERMS {
        let i = f64::from(i);
        term *= (a + i) * (1.0 - x) / (b + i + 1.0);
        sum += term;
    }

    x.powf(a) * (1.0 - x).powf(b) * sum / (a * beta(a, b))
}

/// Approximates the critical F value at significance level `alpha`.
///
/// Uses a Wilson–Hilferty style normal approximation:
///
/// ```text
/// z = −ln(4α(1 − α)),  w = √(z / (1 − z))
/// F = ((w(1 − 1/(9·df2)) − (1 − 1/(9·df1))) / √(1/(9·df1) + w²/(9·df2)))²
/// ```
///
/// `z` exceeds one whenever `4α(1 − α) < e⁻¹`, which includes the
/// conventional levels [`ALPHA_05`] and [`ALPHA_01`]; `w` is then the root of
/// a negative number and the result is NaN.
///
/// # Returns
///
/// `f64::NAN` if `alpha` is not within the open interval `(0, 1)`.
///
/// # Examples
///
/// ```
/// # use ral_stats::distribution::{ALPHA_05, f_critical};
/// assert!(f_critical(ALPHA_05, 2.0, 12.0).is_nan());
/// assert!((f_critical(0.4, 2.0, 12.0) - 9.788_842).abs() < 1e-6);
/// assert!(f_critical(1.0, 2.0, 12.0).is_nan());
/// ```
#[must_use]
pub fn f_critical(alpha: f64, df1: f64, df2: f64) -> f64 {
    if alpha <= 0.0 || alpha >= 1.0 {
        return f64::NAN;
    }

    let z = -(4.0 * alpha * (1.0 - alpha)).ln();
    let w = (z / (1.0 - z)).sqrt();
    let numerator = w * (1.0 - 1.0 / (9.0 * df2)) - (1.0 - 1.0 / (9.0 * df1));
    let denominator = (1.0 / (9.0 * df1) + w * w / (9.0 * df2)).sqrt();

    (numerator / denominator).powi(2)
}
