//! Tab-separated export of input tables and analysis results
//!
//! The output is meant to be pasted into a spreadsheet: one row per line,
//! cells separated by `\t`, every line terminated by `\n`.

use std::io::{self, Write};

use ral_stats::distribution::{TEXTBOOK_F_CRITICAL_01, TEXTBOOK_F_CRITICAL_05};

use crate::{
    dataset::{Dataset, Table},
    ral::TableResult,
};

/// Placeholder for statistics that are absent or not a number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a statistic with four decimals, or [`NOT_AVAILABLE`].
///
/// # Examples
///
/// ```
/// # use ral_analysis::export::format_statistic;
/// assert_eq!(format_statistic(Some(0.5)), "0.5000");
/// assert_eq!(format_statistic(Some(f64::NAN)), "N/A");
/// assert_eq!(format_statistic(None), "N/A");
/// assert_eq!(format_statistic(Some(f64::INFINITY)), "Infinity");
/// ```
#[must_use]
pub fn format_statistic(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_owned(),
        Some(v) if v.is_nan() => NOT_AVAILABLE.to_owned(),
        Some(v) if v.is_infinite() => {
            if v.is_sign_positive() {
                "Infinity".to_owned()
            } else {
                "-Infinity".to_owned()
            }
        }
        Some(v) => format!("{v:.4}"),
    }
}

/// Formats degrees of freedom, or [`NOT_AVAILABLE`].
#[must_use]
pub fn format_degrees_of_freedom(value: Option<i64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |df| df.to_string())
}

/// Label of the `index`-th treatment mean, falling back to `T{n}` for
/// unlabeled trailing means of ragged tables.
#[must_use]
pub fn mean_label(result: &TableResult, index: usize) -> String {
    result
        .labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("T{}", index + 1))
}

/// Writes a single input table.
///
/// ```text
/// Replication/Treatment  T1  T2
/// R1                     1   2
/// R2                     3   4
/// ```
pub fn write_table_tsv<W>(writer: &mut W, table: &Table) -> io::Result<()>
where
    W: Write + ?Sized,
{
    write!(writer, "Replication/Treatment")?;
    for treatment in 1..=table.num_treatments() {
        write!(writer, "\tT{treatment}")?;
    }
    writeln!(writer)?;

    for (i, replication) in table.replications.iter().enumerate() {
        write!(writer, "R{}", i + 1)?;
        for value in replication {
            write!(writer, "\t{value}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes every table of a dataset, each preceded by a `Table {n}` line and
/// separated by an empty line.
pub fn write_dataset_tsv<W>(writer: &mut W, dataset: &Dataset) -> io::Result<()>
where
    W: Write + ?Sized,
{
    for (i, table) in dataset.tables.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "Table {}", i + 1)?;
        write_table_tsv(writer, table)?;
    }
    Ok(())
}

/// Writes the result of a single table as `Metric\tValue` rows followed by
/// the treatment means.
pub fn write_result_tsv<W>(writer: &mut W, result: &TableResult) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(writer, "Metric\tValue")?;
    writeln!(writer, "F-value\t{}", format_statistic(result.f_value))?;
    writeln!(writer, "P-value\t{}", format_statistic(result.p_value))?;
    writeln!(
        writer,
        "Significance Level (α = 0.05)\t{TEXTBOOK_F_CRITICAL_05:.2}"
    )?;
    writeln!(
        writer,
        "Significance Level (α = 0.01)\t{TEXTBOOK_F_CRITICAL_01:.2}"
    )?;
    writeln!(
        writer,
        "F-critical (α = 0.05, approx.)\t{}",
        format_statistic(result.f_critical_05)
    )?;
    writeln!(
        writer,
        "F-critical (α = 0.01, approx.)\t{}",
        format_statistic(result.f_critical_01)
    )?;
    writeln!(writer, "df1\t{}", format_degrees_of_freedom(result.df1))?;
    writeln!(writer, "df2\t{}", format_degrees_of_freedom(result.df2))?;

    writeln!(writer, "Treatment\tMean")?;
    for (i, &mean) in result.means.iter().enumerate() {
        writeln!(
            writer,
            "{}\t{}",
            mean_label(result, i),
            format_statistic(Some(mean))
        )?;
    }
    Ok(())
}

/// Writes the results of every table, each preceded by a `Table {n}` line and
/// separated by an empty line.
pub fn write_results_tsv<W>(writer: &mut W, results: &[TableResult]) -> io::Result<()>
where
    W: Write + ?Sized,
{
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "Table {}", i + 1)?;
        write_result_tsv(writer, result)?;
    }
    Ok(())
}
