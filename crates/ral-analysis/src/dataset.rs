//! Experiment data for completely randomized designs
//!
//! # Data Structure
//!
//! ```text
//! Dataset
//! └─ tables: Vec<Table>            (analyzed independently)
//!     └─ replications: Vec<Vec<f64>>
//!         └─ one observation per treatment
//! ```
//!
//! A well-formed table has the same number of observations in every
//! replication. Ragged tables are accepted and analyzed anyway; the number of
//! treatments is always taken from the first replication.
//!
//! # Serialization
//!
//! Both types serialize transparently as nested JSON arrays:
//!
//! ```json
//! [
//!   [[1, 2, 3], [4, 5, 6]],
//!   [[7, 8, 9], [1, 2, 3]]
//! ]
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inclusive range of generated observations.
const RANDOM_OBSERVATION_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

/// A single table of observations: rows are replications, columns are treatments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub replications: Vec<Vec<f64>>,
}

impl Table {
    #[must_use]
    pub fn new(replications: Vec<Vec<f64>>) -> Self {
        Self { replications }
    }

    /// Creates a `replications × treatments` table filled with zeros.
    #[must_use]
    pub fn zeroed(treatments: usize, replications: usize) -> Self {
        Self {
            replications: vec![vec![0.0; treatments]; replications],
        }
    }

    /// Number of treatments, taken from the first replication.
    #[must_use]
    pub fn num_treatments(&self) -> usize {
        self.replications.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn num_replications(&self) -> usize {
        self.replications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replications.is_empty()
    }

    /// Returns `true` if every replication has the same number of treatments.
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let num_treatments = self.num_treatments();
        self.replications.iter().all(|r| r.len() == num_treatments)
    }

    /// Returns a copy resized to `replications × treatments`.
    ///
    /// Observations at overlapping positions are kept and new positions are
    /// zero-filled. Existing observations that are zero or NaN are also
    /// written back as `0.0`.
    #[must_use]
    pub fn resized(&self, treatments: usize, replications: usize) -> Self {
        let replications = (0..replications)
            .map(|r| {
                let existing = self.replications.get(r).map_or(&[][..], Vec::as_slice);
                (0..treatments)
                    .map(|t| {
                        existing
                            .get(t)
                            .copied()
                            .filter(|v| v.abs() > 0.0)
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();
        Self { replications }
    }

    /// Generates a table of random integer observations in `1..=100`.
    #[must_use]
    pub fn random<R>(treatments: usize, replications: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let replications = (0..replications)
            .map(|_| {
                (0..treatments)
                    .map(|_| f64::from(rng.random_range(RANDOM_OBSERVATION_RANGE)))
                    .collect()
            })
            .collect();
        Self { replications }
    }

    /// Parses a JSON value as a table.
    ///
    /// Returns `None` unless the value is an array of arrays of numbers.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let replications = value
            .as_array()?
            .iter()
            .map(|replication| {
                replication
                    .as_array()?
                    .iter()
                    .map(Value::as_f64)
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { replications })
    }

    /// Converts the table to a JSON value. Non-finite observations become `null`.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Array(
            self.replications
                .iter()
                .map(|r| Value::Array(r.iter().copied().map(Value::from).collect()))
                .collect(),
        )
    }
}

/// An ordered collection of independent tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub tables: Vec<Table>,
}

impl Dataset {
    #[must_use]
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Creates `tables` zero-filled tables of `replications × treatments`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ral_analysis::dataset::Dataset;
    /// let dataset = Dataset::zeroed(3, 5, 2);
    /// assert_eq!(dataset.tables.len(), 2);
    /// assert_eq!(dataset.tables[0].num_replications(), 5);
    /// assert_eq!(dataset.tables[0].num_treatments(), 3);
    /// ```
    #[must_use]
    pub fn zeroed(treatments: usize, replications: usize, tables: usize) -> Self {
        Self {
            tables: vec![Table::zeroed(treatments, replications); tables],
        }
    }

    /// Generates `tables` tables of random integer observations in `1..=100`.
    #[must_use]
    pub fn random<R>(treatments: usize, replications: usize, tables: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            tables: (0..tables)
                .map(|_| Table::random(treatments, replications, rng))
                .collect(),
        }
    }

    /// Builds a dataset from loosely parsed tables, replacing malformed ones with empty tables.
    #[must_use]
    pub fn from_loose(tables: Vec<Option<Table>>) -> Self {
        Self {
            tables: tables.into_iter().map(Option::unwrap_or_default).collect(),
        }
    }

    /// Returns a copy resized to the given dimensions.
    ///
    /// Overlapping observations are preserved, new tables, replications and
    /// treatments are zero-filled, and anything beyond the new bounds is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ral_analysis::dataset::{Dataset, Table};
    /// let dataset = Dataset::new(vec![Table::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]])]);
    /// let resized = dataset.resized(3, 1, 2);
    /// assert_eq!(resized.tables[0].replications, vec![vec![1.0, 2.0, 0.0]]);
    /// assert_eq!(resized.tables[1], Table::zeroed(3, 1));
    /// ```
    #[must_use]
    pub fn resized(&self, treatments: usize, replications: usize, tables: usize) -> Self {
        let empty = Table::default();
        Self {
            tables: (0..tables)
                .map(|i| {
                    self.tables
                        .get(i)
                        .unwrap_or(&empty)
                        .resized(treatments, replications)
                })
                .collect(),
        }
    }

    /// Converts the dataset to a JSON value. Non-finite observations become `null`.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Array(self.tables.iter().map(Table::to_json_value).collect())
    }
}
