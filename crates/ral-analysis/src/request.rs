//! Analysis requests
//!
//! An [`AnalysisRequest`] carries the declared dimensions of an experiment
//! together with its raw observations:
//!
//! ```json
//! {
//!   "treatments": 3,
//!   "replications": 2,
//!   "tables": 1,
//!   "data": [[[5, 7, 9], [6, 8, 10]]]
//! }
//! ```
//!
//! The declared dimensions are informational. Analysis always runs on `data`
//! as given, so a request whose dimensions disagree with its data is still
//! analyzed; [`AnalysisRequest::shape_mismatches`] reports the disagreements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    dataset::{Dataset, Table},
    ral::{self, TableResult},
};

/// Default number of treatments for a new request.
pub const DEFAULT_TREATMENTS: usize = 3;
/// Default number of replications for a new request.
pub const DEFAULT_REPLICATIONS: usize = 5;
/// Default number of tables for a new request.
pub const DEFAULT_TABLES: usize = 1;

/// Minimum number of treatments accepted by input forms.
pub const MIN_TREATMENTS: usize = 2;
/// Minimum number of replications accepted by input forms.
pub const MIN_REPLICATIONS: usize = 2;
/// Minimum number of tables accepted by input forms.
pub const MIN_TABLES: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub treatments: usize,
    pub replications: usize,
    pub tables: usize,
    /// Raw observations. Kept untyped so malformed data still reaches analysis.
    #[serde(default)]
    pub data: Value,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self::from_dataset(
            DEFAULT_TREATMENTS,
            DEFAULT_REPLICATIONS,
            DEFAULT_TABLES,
            &Dataset::zeroed(DEFAULT_TREATMENTS, DEFAULT_REPLICATIONS, DEFAULT_TABLES),
        )
    }
}

/// A disagreement between the declared dimensions of a request and its data.
///
/// Table and replication numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeMismatch {
    #[display("data is not an array of tables")]
    NotADataset,
    #[display("expected {expected} tables, found {found}")]
    TableCount { expected: usize, found: usize },
    #[display("table {table}: not an array of numeric replications")]
    MalformedTable { table: usize },
    #[display("table {table}: expected {expected} replications, found {found}")]
    ReplicationCount {
        table: usize,
        expected: usize,
        found: usize,
    },
    #[display(
        "table {table}, replication {replication}: expected {expected} treatments, found {found}"
    )]
    TreatmentCount {
        table: usize,
        replication: usize,
        expected: usize,
        found: usize,
    },
}

impl AnalysisRequest {
    /// Creates a request from declared dimensions and typed data.
    #[must_use]
    pub fn from_dataset(
        treatments: usize,
        replications: usize,
        tables: usize,
        dataset: &Dataset,
    ) -> Self {
        Self {
            treatments,
            replications,
            tables,
            data: dataset.to_json_value(),
        }
    }

    /// Parses `data` into loosely typed tables.
    ///
    /// See [`ral::parse_loose_dataset`].
    #[must_use]
    pub fn loose_tables(&self) -> Option<Vec<Option<Table>>> {
        ral::parse_loose_dataset(&self.data)
    }

    /// Analyzes every table in `data`.
    #[must_use]
    pub fn analyze(&self) -> Vec<TableResult> {
        ral::calculate_ral_json(&self.data)
    }

    /// Returns a copy with new dimensions and `data` resized to match.
    ///
    /// Malformed tables are treated as empty before resizing, so they come
    /// back zero-filled.
    ///
    /// # Examples
    ///
    /// ```
    /// use ral_analysis::request::AnalysisRequest;
    /// use serde_json::json;
    ///
    /// let request = AnalysisRequest {
    ///     treatments: 2,
    ///     replications: 2,
    ///     tables: 1,
    ///     data: json!([[[1, 2], [3, 4]]]),
    /// };
    /// let resized = request.resized(3, 2, 1);
    /// assert_eq!(resized.data, json!([[[1.0, 2.0, 0.0], [3.0, 4.0, 0.0]]]));
    /// assert!(resized.shape_mismatches().is_empty());
    /// ```
    #[must_use]
    pub fn resized(&self, treatments: usize, replications: usize, tables: usize) -> Self {
        let dataset = Dataset::from_loose(self.loose_tables().unwrap_or_default());
        let dataset = dataset.resized(treatments, replications, tables);
        Self::from_dataset(treatments, replications, tables, &dataset)
    }

    /// Lists every place where `data` disagrees with the declared dimensions.
    #[must_use]
    pub fn shape_mismatches(&self) -> Vec<ShapeMismatch> {
        let Some(tables) = self.loose_tables() else {
            return vec![ShapeMismatch::NotADataset];
        };

        let mut mismatches = vec![];
        if tables.len() != self.tables {
            mismatches.push(ShapeMismatch::TableCount {
                expected: self.tables,
                found: tables.len(),
            });
        }

        for (table_index, table) in tables.iter().enumerate() {
            let table_number = table_index + 1;
            let Some(table) = table else {
                mismatches.push(ShapeMismatch::MalformedTable {
                    table: table_number,
                });
                continue;
            };
            if table.num_replications() != self.replications {
                mismatches.push(ShapeMismatch::ReplicationCount {
                    table: table_number,
                    expected: self.replications,
                    found: table.num_replications(),
                });
            }
            for (replication_index, replication) in table.replications.iter().enumerate() {
                if replication.len() != self.treatments {
                    mismatches.push(ShapeMismatch::TreatmentCount {
                        table: table_number,
                        replication: replication_index + 1,
                        expected: self.treatments,
                        found: replication.len(),
                    });
                }
            }
        }

        mismatches
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(data: Value) -> AnalysisRequest {
        AnalysisRequest {
            treatments: 2,
            replications: 2,
            tables: 1,
            data,
        }
    }

    #[test]
    fn test_default_request_matches_form_defaults() {
        let request = AnalysisRequest::default();
        assert_eq!(
            (request.treatments, request.replications, request.tables),
            (3, 5, 1)
        );
        assert!(request.shape_mismatches().is_empty());
        assert_eq!(request.analyze().len(), 1);
    }

    #[test]
    fn test_deserialize_without_data() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{ "treatments": 2, "replications": 2, "tables": 1 }"#).unwrap();
        assert_eq!(request.data, Value::Null);
        assert!(request.analyze().is_empty());
        assert_eq!(request.shape_mismatches(), [ShapeMismatch::NotADataset]);
    }

    #[test]
    fn test_well_formed_request_has_no_mismatches() {
        assert!(request(json!([[[1, 2], [3, 4]]])).shape_mismatches().is_empty());
    }

    #[test]
    fn test_shape_mismatches_are_reported() {
        let mismatches = request(json!([[[1, 2, 3], [4, 5]], "oops", [[1, 2]]])).shape_mismatches();
        assert_eq!(
            mismatches,
            [
                ShapeMismatch::TableCount {
                    expected: 1,
                    found: 3
                },
                ShapeMismatch::TreatmentCount {
                    table: 1,
                    replication: 1,
                    expected: 2,
                    found: 3
                },
                ShapeMismatch::MalformedTable { table: 2 },
                ShapeMismatch::ReplicationCount {
                    table: 3,
                    expected: 2,
                    found: 1
                },
            ]
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let mismatch = ShapeMismatch::TreatmentCount {
            table: 1,
            replication: 2,
            expected: 3,
            found: 4,
        };
        assert_eq!(
            mismatch.to_string(),
            "table 1, replication 2: expected 3 treatments, found 4"
        );
    }

    #[test]
    fn test_mismatched_request_is_still_analyzed() {
        let results = request(json!([[[1, 2, 3], [4, 5, 6]]])).analyze();
        assert_eq!(results[0].labels.len(), 3);
    }

    #[test]
    fn test_resize_replaces_malformed_tables() {
        let resized = request(json!(["oops", [[1, 2], [3, 4]]])).resized(2, 1, 2);
        assert_eq!(resized.data, json!([[[0.0, 0.0]], [[1.0, 2.0]]]));
        assert_eq!(resized.tables, 2);
    }

    #[test]
    fn test_resize_non_array_data() {
        let resized = request(json!(42)).resized(2, 2, 1);
        assert_eq!(resized.data, json!([[[0.0, 0.0], [0.0, 0.0]]]));
    }
}
