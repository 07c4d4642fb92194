//! Completely randomized design (RAL) analysis of experiment tables
//!
//! This crate turns raw experiment data into per-table one-way ANOVA results,
//! using the numeric core in `ral-stats`.
//!
//! # Overview
//!
//! 1. **Describe the experiment** ([`request::AnalysisRequest`]): Declared
//!    dimensions plus raw observations
//! 2. **Model the data** ([`dataset::Dataset`]): Tables of replications ×
//!    treatments, with resizing and random generation
//! 3. **Analyze** ([`ral::calculate_ral`]): One [`ral::TableResult`] per
//!    table, in input order
//! 4. **Export** ([`export`]): Tab-separated text for spreadsheets
//!
//! # Error Policy
//!
//! Analysis never fails. Input that is not a sequence of tables produces no
//! results, a table that is not a sequence of replications produces an
//! absent result, and degenerate tables produce NaN statistics.
//!
//! # Examples
//!
//! ```
//! use ral_analysis::request::AnalysisRequest;
//! use serde_json::json;
//!
//! let request: AnalysisRequest = serde_json::from_value(json!({
//!     "treatments": 3,
//!     "replications": 2,
//!     "tables": 1,
//!     "data": [[[5, 7, 9], [6, 8, 10]]],
//! }))
//! .unwrap();
//!
//! let results = request.analyze();
//! assert_eq!(results[0].labels, ["T1", "T2", "T3"]);
//! assert_eq!(results[0].means, [5.5, 7.5, 9.5]);
//! assert_eq!(results[0].f_value, Some(16.0));
//! ```

pub mod dataset;
pub mod export;
pub mod ral;
pub mod request;
