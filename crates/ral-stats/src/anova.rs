use crate::descriptive;

/// One-way ANOVA decomposition of a single completely randomized design table.
///
/// A table is a sequence of replications (rows), each holding one observation
/// per treatment (column). The number of treatments is taken from the first
/// replication; ragged rows are tolerated as described in
/// [`descriptive::treatment_means`].
///
/// Degenerate tables are not rejected. Zero replications, a single treatment,
/// or an empty table produce NaN or infinite values through ordinary
/// floating-point division, which callers are expected to render as "N/A".
///
/// # Examples
///
/// ```
/// use ral_stats::anova::AnovaDecomposition;
///
/// let table = [vec![1.0, 2.0], vec![3.0, 4.0]];
/// let anova = AnovaDecomposition::from_table(&table);
/// assert_eq!(anova.grand_mean, 2.5);
/// assert_eq!(anova.treatment_means, vec![2.0, 3.0]);
/// assert_eq!((anova.df1, anova.df2), (1, 2));
/// assert_eq!(anova.f_value(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaDecomposition {
    /// Number of treatments (length of the first replication).
    pub num_treatments: usize,
    /// Number of replications (rows in the table).
    pub num_replications: usize,
    /// Mean of all observations.
    pub grand_mean: f64,
    /// Mean of each treatment across replications.
    pub treatment_means: Vec<f64>,
    /// Total sum of squares over all observations.
    pub total_ss: f64,
    /// Between-treatment sum of squares.
    pub treatment_ss: f64,
    /// Within-treatment (error) sum of squares, `total_ss - treatment_ss`.
    ///
    /// Not clamped: rounding may leave it slightly negative.
    pub error_ss: f64,
    /// Between-treatment degrees of freedom, `T - 1`.
    pub df1: i64,
    /// Error degrees of freedom, `T·R - T`.
    pub df2: i64,
}

impl AnovaDecomposition {
    /// Decomposes the variation of a table into treatment and error components.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn from_table<R>(replications: &[R]) -> Self
    where
        R: AsRef<[f64]>,
    {
        let num_treatments = replications.first().map_or(0, |r| r.as_ref().len());
        let num_replications = replications.len();

        let observations = replications
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect::<Vec<_>>();
        let total_ss = descriptive::sum_of_squares(&observations);
        let grand_mean = descriptive::mean(&observations);

        let treatment_means = descriptive::treatment_means(replications);
        let weight = num_replications as f64;
        let treatment_ss = treatment_means
            .iter()
            .fold(0.0, |sum, mean| sum + weight * (mean - grand_mean).powi(2));
        let error_ss = total_ss - treatment_ss;

        let t = num_treatments as i64;
        let r = num_replications as i64;

        Self {
            num_treatments,
            num_replications,
            grand_mean,
            treatment_means,
            total_ss,
            treatment_ss,
            error_ss,
            df1: t - 1,
            df2: t * r - t,
        }
    }

    /// Returns `true` if the table had no replications at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_replications == 0
    }

    /// Between-treatment mean square, `treatment_ss / df1`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn treatment_ms(&self) -> f64 {
        self.treatment_ss / self.df1 as f64
    }

    /// Error mean square, `error_ss / df2`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn error_ms(&self) -> f64 {
        self.error_ss / self.df2 as f64
    }

    /// The F statistic, `treatment_ms / error_ms`.
    ///
    /// Returns `f64::NAN` for an empty table. A single treatment (`df1 = 0`)
    /// or a table without error variation yields NaN or infinity.
    #[must_use]
    pub fn f_value(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.treatment_ms() / self.error_ms()
    }
}
