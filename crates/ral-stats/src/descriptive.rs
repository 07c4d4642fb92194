/// Computes the arithmetic mean of a series.
///
/// Values are accumulated left to right starting from zero, then divided by
/// the number of values.
///
/// # Returns
///
/// The mean, or `f64::NAN` if `values` is empty.
///
/// # Examples
///
/// ```
/// # use ral_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
/// assert!(mean(&[]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |sum, value| sum + value) / values.len() as f64
}

/// Computes the sum of squared deviations from the mean, `Σ(xᵢ − x̄)²`.
///
/// # Arguments
///
/// * `values` - The series to summarize. Should contain at least one value.
///
/// # Returns
///
/// The sum of squares. An empty series has no mean, so the result is
/// `f64::NAN` rather than a panic.
///
/// # Examples
///
/// ```
/// # use ral_stats::descriptive::sum_of_squares;
/// assert_eq!(sum_of_squares(&[1.0, 2.0, 3.0, 4.0]), 5.0);
/// assert_eq!(sum_of_squares(&[7.0]), 0.0);
/// assert!(sum_of_squares(&[]).is_nan());
/// ```
#[must_use]
pub fn sum_of_squares(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = mean(values);
    values
        .iter()
        .fold(0.0, |sum, value| sum + (value - mean).powi(2))
}

/// Computes the mean of each treatment (column) across all replications (rows).
///
/// The number of treatments is taken from the first replication. Each
/// observation contributes `value / R` to its treatment, where `R` is the
/// number of replications, so the rounding matches incremental summation.
///
/// Ragged replications are tolerated:
///
/// - a replication shorter than the first one leaves its missing treatments
///   untouched (they are simply not accumulated);
/// - a replication longer than the first one extends the result, and the
///   extra treatments are `f64::NAN` because they have no defined start value.
///
/// # Examples
///
/// ```
/// # use ral_stats::descriptive::treatment_means;
/// let table = [vec![1.0, 2.0], vec![3.0, 4.0]];
/// assert_eq!(treatment_means(&table), vec![2.0, 3.0]);
///
/// let empty: [Vec<f64>; 0] = [];
/// assert!(treatment_means(&empty).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn treatment_means<R>(replications: &[R]) -> Vec<f64>
where
    R: AsRef<[f64]>,
{
    let num_treatments = replications.first().map_or(0, |r| r.as_ref().len());
    let num_replications = replications.len() as f64;

    let mut means = vec![0.0; num_treatments];
    for replication in replications {
        for (treatment, &value) in replication.as_ref().iter().enumerate() {
            if treatment >= means.len() {
                means.resize(treatment + 1, f64::NAN);
            }
            means[treatment] += value / num_replications;
        }
    }
    means
}
