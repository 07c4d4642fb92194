//! Human-readable analysis report
//!
//! Prints one block per table: the ANOVA statistics followed by a bar chart
//! of the treatment means.

use std::path::PathBuf;

use ral_analysis::{
    export::{self, format_degrees_of_freedom, format_statistic},
    ral::TableResult,
};
use ral_stats::distribution::{TEXTBOOK_F_CRITICAL_01, TEXTBOOK_F_CRITICAL_05};

use crate::util;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Path to the analysis request JSON file
    input: PathBuf,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let request = util::read_request_file(&arg.input)?;
    let results = request.analyze();

    println!(
        "RAL Analysis Report ({} treatments x {} replications, {} tables)",
        request.treatments, request.replications, request.tables
    );
    println!("==========================================\n");

    print_legend();
    println!();

    for (i, result) in results.iter().enumerate() {
        print_result(i, result);
        println!();
    }

    Ok(())
}

fn print_legend() {
    println!("Legend:");
    println!("  Significance Level   : Textbook critical F values for reference");
    println!("  F-critical (approx.) : Closed-form approximation, undefined at α = 0.05 and 0.01");
    println!("  N/A                  : Statistic is undefined or could not be computed");
}

fn print_result(index: usize, result: &TableResult) {
    println!("Table {}", index + 1);

    if result.is_absent() {
        println!("  Not a table of replications; no statistics computed");
        return;
    }

    print_metric_table(result);
    println!();
    print_means_chart(result);
}

fn print_metric_table(result: &TableResult) {
    let rows = [
        ("F-value", format_statistic(result.f_value)),
        ("P-value", format_statistic(result.p_value)),
        (
            "Significance Level (α = 0.05)",
            format!("{TEXTBOOK_F_CRITICAL_05:.2}"),
        ),
        (
            "Significance Level (α = 0.01)",
            format!("{TEXTBOOK_F_CRITICAL_01:.2}"),
        ),
        (
            "F-critical (α = 0.05, approx.)",
            format_statistic(result.f_critical_05),
        ),
        (
            "F-critical (α = 0.01, approx.)",
            format_statistic(result.f_critical_01),
        ),
        ("df1 (treatments)", format_degrees_of_freedom(result.df1)),
        ("df2 (error)", format_degrees_of_freedom(result.df2)),
    ];

    println!("  {:<32} {:>12}", "Metric", "Value");
    // label(32) + value(12) + space(1)
    println!("  {}", "-".repeat(45));
    for (label, value) in rows {
        println!("  {label:<32} {value:>12}");
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bar_length(mean: f64, max: f64) -> usize {
    if max > 0.0 && mean.is_finite() && mean > 0.0 {
        ((mean / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    }
}

fn print_means_chart(result: &TableResult) {
    println!("  Treatment Means");
    if result.means.is_empty() {
        println!("  (no treatments)");
        return;
    }

    let max = result
        .means
        .iter()
        .copied()
        .filter(|m| m.is_finite())
        .fold(0.0, f64::max);
    for (i, &mean) in result.means.iter().enumerate() {
        println!(
            "  {:<6} {:>12} {}",
            export::mean_label(result, i),
            format_statistic(Some(mean)),
            "█".repeat(bar_length(mean, max)),
        );
    }
}
