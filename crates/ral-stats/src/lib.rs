//! Numeric core for one-way analysis of variance on completely randomized designs.
//!
//! This crate provides the statistical building blocks used by `ral-analysis`:
//!
//! - **Descriptive statistics**: Means, treatment means and sums of squares
//! - **Special functions**: Lanczos gamma and the beta function
//! - **ANOVA**: Sum-of-squares decomposition, degrees of freedom and the F statistic
//! - **Distribution approximations**: Closed-form p-value and critical F approximations
//!
//! Nothing in this crate fails. Undefined results (empty inputs, a single
//! treatment, out-of-range significance levels) are reported as `f64::NAN` or
//! infinity, produced by ordinary floating-point arithmetic.
//!
//! # Modules
//!
//! - [`descriptive`]: Aggregations over numeric series and tables
//! - [`special`]: Gamma and beta functions
//! - [`anova`]: One-way ANOVA decomposition of a single table
//! - [`distribution`]: F distribution approximations
//!
//! # Examples
//!
//! ## Decomposing a table
//!
//! ```
//! use ral_stats::anova::AnovaDecomposition;
//!
//! // Rows are replications, columns are treatments.
//! let table = [[5.0, 7.0, 9.0], [6.0, 8.0, 10.0]];
//! let anova = AnovaDecomposition::from_table(&table);
//! assert_eq!(anova.treatment_means, vec![5.5, 7.5, 9.5]);
//! assert_eq!(anova.f_value(), 16.0);
//! ```
//!
//! ## Approximating significance
//!
//! ```
//! use ral_stats::distribution::{self, ALPHA_05};
//!
//! let p = distribution::p_value(16.0, 2.0, 3.0);
//! assert!(p > 0.0 && p < 1.0);
//!
//! // The critical-value approximation is undefined at conventional levels.
//! assert!(distribution::f_critical(ALPHA_05, 2.0, 3.0).is_nan());
//! ```

pub mod anova;
pub mod descriptive;
pub mod distribution;
pub mod special;
