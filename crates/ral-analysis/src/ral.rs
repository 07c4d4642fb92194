//! Completely randomized design (RAL) analysis over a collection of tables
//!
//! Each table is analyzed independently:
//!
//! ```text
//! Table ─► AnovaDecomposition ─► F ─┬─► p-value
//!                                   ├─► F-critical (α = 0.05)
//!                                   └─► F-critical (α = 0.01)
//! ```
//!
//! Analysis never fails. Malformed tables yield a [`TableResult`] whose
//! statistics are absent (`None`), and degenerate tables yield NaN or infinite
//! statistics (`Some(NaN)`), which presentation layers render as "N/A".

use log::debug;
use ral_stats::{
    anova::AnovaDecomposition,
    distribution::{self, ALPHA_01, ALPHA_05},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::{Dataset, Table};

/// Result of analyzing a single table.
///
/// Serialized with camelCase field names. Absent statistics are omitted and
/// NaN statistics serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResult {
    /// Treatment labels `T1..Tn`.
    pub labels: Vec<String>,
    /// Treatment means, in the same order as `labels`.
    ///
    /// Ragged tables may produce trailing NaN means without a label.
    pub means: Vec<f64>,
    /// F statistic, between-treatment over error mean square.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_value: Option<f64>,
    /// Approximate upper-tail p-value of `f_value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Approximate critical F value at α = 0.05.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_critical_05: Option<f64>,
    /// Approximate critical F value at α = 0.01.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_critical_01: Option<f64>,
    /// Between-treatment degrees of freedom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df1: Option<i64>,
    /// Error degrees of freedom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df2: Option<i64>,
}

impl TableResult {
    /// A result whose statistics are all explicitly absent.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Returns `true` if no statistic was computed for this table.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.f_value.is_none()
            && self.p_value.is_none()
            && self.f_critical_05.is_none()
            && self.f_critical_01.is_none()
            && self.df1.is_none()
            && self.df2.is_none()
    }

    /// Analyzes a single table.
    ///
    /// # Examples
    ///
    /// ```
    /// use ral_analysis::{dataset::Table, ral::TableResult};
    ///
    /// let table = Table::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    /// let result = TableResult::from_table(&table);
    /// assert_eq!(result.labels, ["T1", "T2"]);
    /// assert_eq!(result.means, [2.0, 3.0]);
    /// assert_eq!(result.f_value, Some(0.5));
    /// assert_eq!((result.df1, result.df2), (Some(1), Some(2)));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let anova = AnovaDecomposition::from_table(&table.replications);
        let labels = (1..=anova.num_treatments).map(|i| format!("T{i}")).collect();

        let f_value = anova.f_value();
        let df1 = anova.df1 as f64;
        let df2 = anova.df2 as f64;
        let p_value = distribution::p_value(f_value, df1, df2);
        let f_critical_05 = distribution::f_critical(ALPHA_05, df1, df2);
        let f_critical_01 = distribution::f_critical(ALPHA_01, df1, df2);

        Self {
            labels,
            means: anova.treatment_means,
            f_value: Some(f_value),
            p_value: Some(p_value),
            f_critical_05: Some(f_critical_05),
            f_critical_01: Some(f_critical_01),
            df1: Some(anova.df1),
            df2: Some(anova.df2),
        }
    }
}

/// Analyzes every table of a loosely typed dataset.
///
/// - `None` dataset (not a sequence): returns an empty vector.
/// - `None` table (not a sequence): yields [`TableResult::absent`] at that position.
///
/// The output has one result per input table, in input order.
///
/// # Examples
///
/// ```
/// use ral_analysis::{dataset::Table, ral::calculate_ral};
///
/// assert!(calculate_ral(None).is_empty());
///
/// let tables = [Some(Table::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]])), None];
/// let results = calculate_ral(Some(&tables));
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].df2, Some(2));
/// assert!(results[1].is_absent());
/// ```
#[must_use]
pub fn calculate_ral(dataset: Option<&[Option<Table>]>) -> Vec<TableResult> {
    let Some(tables) = dataset else {
        debug!("dataset is not a sequence of tables");
        return vec![];
    };

    tables
        .iter()
        .enumerate()
        .map(|(index, table)| match table {
            Some(table) => analyze_table(index, table),
            None => {
                debug!("table #{}: not a sequence of replications", index + 1);
                TableResult::absent()
            }
        })
        .collect()
}

/// Analyzes every table of a well-typed dataset.
#[must_use]
pub fn calculate_dataset(dataset: &Dataset) -> Vec<TableResult> {
    dataset
        .tables
        .iter()
        .enumerate()
        .map(|(index, table)| analyze_table(index, table))
        .collect()
}

/// Analyzes an arbitrary JSON value, applying the same rules as [`calculate_ral`].
///
/// # Examples
///
/// ```
/// use ral_analysis::ral::calculate_ral_json;
/// use serde_json::json;
///
/// assert!(calculate_ral_json(&json!("not an array")).is_empty());
/// assert_eq!(calculate_ral_json(&json!([[[1, 2], [3, 4]]]))[0].means, [2.0, 3.0]);
/// ```
#[must_use]
pub fn calculate_ral_json(data: &Value) -> Vec<TableResult> {
    let tables = parse_loose_dataset(data);
    calculate_ral(tables.as_deref())
}

/// Parses a JSON value into loosely typed tables.
///
/// Returns `None` if `data` is not an array. Elements that are not arrays of
/// arrays of numbers become `None`.
#[must_use]
pub fn parse_loose_dataset(data: &Value) -> Option<Vec<Option<Table>>> {
    let tables = data.as_array()?;
    Some(tables.iter().map(Table::from_json_value).collect())
}

fn analyze_table(index: usize, table: &Table) -> TableResult {
    let result = TableResult::from_table(table);
    debug!(
        "table #{}: {} treatments x {} replications, F = {:?}, p = {:?}",
        index + 1,
        table.num_treatments(),
        table.num_replications(),
        result.f_value,
        result.p_value,
    );
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    fn table(rows: &[&[f64]]) -> Table {
        Table::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    fn to_bits(result: &TableResult) -> Vec<u64> {
        let stats = [
            result.f_value,
            result.p_value,
            result.f_critical_05,
            result.f_critical_01,
        ];
        result
            .means
            .iter()
            .copied()
            .chain(stats.into_iter().flatten())
            .map(f64::to_bits)
            .collect()
    }

    #[test]
    fn test_two_by_two_table() {
        let result = TableResult::from_table(&table(&[&[1.0, 2.0], &[3.0, 4.0]]));
        assert_eq!(result.labels, ["T1", "T2"]);
        assert_eq!(result.means, [2.0, 3.0]);
        assert_eq!((result.df1, result.df2), (Some(1), Some(2)));
        assert_relative_eq!(result.f_value.unwrap(), 0.5);
        assert_relative_eq!(result.p_value.unwrap(), 0.207_349_514_266_209_4, max_relative = 1e-9);
        assert!(result.f_critical_05.unwrap().is_nan());
        assert!(result.f_critical_01.unwrap().is_nan());
    }

    #[test]
    fn test_labels_follow_first_replication() {
        let result = TableResult::from_table(&Table::zeroed(5, 3));
        assert_eq!(result.labels, ["T1", "T2", "T3", "T4", "T5"]);
        assert_eq!(result.means, [0.0; 5]);
        assert_eq!((result.df1, result.df2), (Some(4), Some(10)));
    }

    #[test]
    fn test_all_equal_observations() {
        let result = TableResult::from_table(&table(&[&[3.0, 3.0, 3.0], &[3.0, 3.0, 3.0]]));
        assert!(result.means.iter().all(|&m| m == 3.0));
        // 0 / 0
        assert!(result.f_value.unwrap().is_nan());
        assert!(result.p_value.unwrap().is_nan());
    }

    #[test]
    fn test_zero_f_value_has_nan_p_value() {
        let result = TableResult::from_table(&table(&[&[1.0, 1.0], &[3.0, 3.0]]));
        assert_eq!(result.f_value, Some(0.0));
        assert!(result.p_value.unwrap().is_nan());
    }

    #[test]
    fn test_non_sequence_dataset_is_empty() {
        assert!(calculate_ral(None).is_empty());
        assert!(calculate_ral_json(&Value::Null).is_empty());
        assert!(calculate_ral_json(&json!("not an array")).is_empty());
        assert!(calculate_ral_json(&json!({ "tables": [] })).is_empty());
    }

    #[test]
    fn test_empty_dataset_is_empty() {
        assert!(calculate_ral(Some(&[])).is_empty());
        assert!(calculate_dataset(&Dataset::default()).is_empty());
    }

    #[test]
    fn test_malformed_table_is_absent() {
        let results = calculate_ral_json(&json!([null, "table", [[1, 2], [3, 4]], 5]));
        assert_eq!(results.len(), 4);
        assert!(results[0].is_absent());
        assert!(results[1].is_absent());
        assert!(!results[2].is_absent());
        assert!(results[3].is_absent());
        assert!(results[0].labels.is_empty());
        assert!(results[0].means.is_empty());
    }

    #[test]
    fn test_empty_table_has_no_labels_and_undefined_statistics() {
        let results = calculate_ral_json(&json!([[]]));
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(result.labels.is_empty());
        assert!(result.means.is_empty());
        for stat in [
            result.f_value,
            result.p_value,
            result.f_critical_05,
            result.f_critical_01,
        ] {
            assert!(stat.is_none_or(f64::is_nan));
        }
        assert_eq!((result.df1, result.df2), (Some(-1), Some(0)));
    }

    #[test]
    fn test_single_treatment_propagates_nan() {
        let result = TableResult::from_table(&table(&[&[1.0], &[3.0]]));
        assert_eq!(result.df1, Some(0));
        assert!(result.f_value.unwrap().is_nan());
        assert!(result.p_value.unwrap().is_nan());
    }

    #[test]
    fn test_single_treatment_rounding_gives_infinite_f() {
        let result = TableResult::from_table(&table(&[&[1.0], &[2.0], &[4.0]]));
        assert_eq!((result.df1, result.df2), (Some(0), Some(2)));
        assert_eq!(result.f_value, Some(f64::INFINITY));
    }

    #[test]
    fn test_order_is_preserved() {
        let dataset = Dataset::new(vec![
            table(&[&[5.0, 7.0, 9.0], &[6.0, 8.0, 10.0]]),
            table(&[&[1.0, 2.0], &[3.0, 4.0]]),
            Table::zeroed(4, 2),
        ]);
        let results = calculate_dataset(&dataset);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].f_value, Some(16.0));
        assert_eq!(results[1].f_value, Some(0.5));
        assert_eq!(results[2].labels.len(), 4);
    }

    #[test]
    fn test_tables_are_independent() {
        let a = table(&[&[10.0, 20.0, 30.0], &[12.0, 22.0, 29.0]]);
        let b = table(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let alone = calculate_dataset(&Dataset::new(vec![b.clone()]));
        let together = calculate_dataset(&Dataset::new(vec![a, b]));
        assert_eq!(to_bits(&alone[0]), to_bits(&together[1]));
    }

    #[test]
    fn test_repeated_analysis_is_bit_identical() {
        let data = json!([[[10, 20, 30], [12, 22, 29], [11, 19, 31], [9, 21, 30]], [[1.5, 2.25]]]);
        let first = calculate_ral_json(&data);
        let second = calculate_ral_json(&data);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(to_bits(a), to_bits(b));
            assert_eq!(a.labels, b.labels);
        }
    }

    #[test]
    fn test_typed_and_loose_paths_agree() {
        let data = json!([[[3, 1, 4], [1, 5, 9], [2, 6, 5]]]);
        let dataset: Dataset = serde_json::from_value(data.clone()).unwrap();
        let typed = calculate_dataset(&dataset);
        let loose = calculate_ral_json(&data);
        assert_eq!(to_bits(&typed[0]), to_bits(&loose[0]));
    }

    #[test]
    fn test_serialization_uses_camel_case_and_null_for_nan() {
        let result = TableResult::from_table(&table(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["labels"], json!(["T1", "T2"]));
        assert_eq!(value["fValue"], json!(0.5));
        assert_eq!(value["fCritical05"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("fCritical01"));
        assert_eq!(value["df1"], json!(1));
        assert_eq!(value["df2"], json!(2));
    }

    #[test]
    fn test_absent_result_omits_statistics() {
        let value = serde_json::to_value(TableResult::absent()).unwrap();
        assert_eq!(value, json!({ "labels": [], "means": [] }));
    }
}
