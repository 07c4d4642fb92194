use std::path::PathBuf;

use ral_analysis::{dataset::Dataset, export};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    /// Path to the analysis request JSON file
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let ExportArg { input, output } = arg;

    let request = util::read_request_file(input)?;
    // Malformed tables are exported as empty tables.
    let dataset = Dataset::from_loose(request.loose_tables().unwrap_or_default());
    Output::save_text(output.clone(), |w| export::write_dataset_tsv(w, &dataset))?;

    if let Some(path) = output {
        eprintln!("Exported {} tables to: {}", dataset.tables.len(), path.display());
    }
    Ok(())
}
