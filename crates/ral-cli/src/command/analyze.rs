use std::path::PathBuf;

use ral_analysis::export;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Tsv,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the analysis request JSON file
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format (json or tsv)
    #[arg(long, default_value = "json")]
    pub(super) format: OutputFormat,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input,
        output,
        format,
    } = arg;

    let request = util::read_request_file(input)?;
    let results = request.analyze();
    eprintln!("Analyzed {} tables from {}", results.len(), input.display());

    match format {
        OutputFormat::Json => Output::save_json(&results, output.clone())?,
        OutputFormat::Tsv => {
            Output::save_text(output.clone(), |w| export::write_results_tsv(w, &results))?;
        }
    }

    if let Some(path) = output {
        eprintln!("Results saved to: {} ({format})", path.display());
    }
    Ok(())
}
