use std::path::PathBuf;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ResizeArg {
    /// Path to the analysis request JSON file
    input: PathBuf,
    /// New number of treatments (defaults to the current value)
    #[arg(long, value_parser = util::parse_treatments)]
    treatments: Option<usize>,
    /// New number of replications (defaults to the current value)
    #[arg(long, value_parser = util::parse_replications)]
    replications: Option<usize>,
    /// New number of tables (defaults to the current value)
    #[arg(long, value_parser = util::parse_tables)]
    tables: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ResizeArg) -> anyhow::Result<()> {
    let ResizeArg {
        input,
        treatments,
        replications,
        tables,
        output,
    } = arg;

    let request = util::read_request_file(input)?;
    let treatments = treatments.unwrap_or(request.treatments);
    let replications = replications.unwrap_or(request.replications);
    let tables = tables.unwrap_or(request.tables);

    let resized = request.resized(treatments, replications, tables);
    Output::save_json(&resized, output.clone())?;

    eprintln!(
        "Resized {}: {} x {} x {} -> {tables} x {replications} x {treatments} (tables x replications x treatments)",
        input.display(),
        request.tables,
        request.replications,
        request.treatments,
    );
    Ok(())
}
