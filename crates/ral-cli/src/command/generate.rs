use std::path::PathBuf;

use ral_analysis::{
    dataset::Dataset,
    request::{AnalysisRequest, DEFAULT_REPLICATIONS, DEFAULT_TABLES, DEFAULT_TREATMENTS},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of treatments (columns)
    #[arg(long, default_value_t = DEFAULT_TREATMENTS, value_parser = util::parse_treatments)]
    pub(super) treatments: usize,
    /// Number of replications (rows)
    #[arg(long, default_value_t = DEFAULT_REPLICATIONS, value_parser = util::parse_replications)]
    pub(super) replications: usize,
    /// Number of tables
    #[arg(long, default_value_t = DEFAULT_TABLES, value_parser = util::parse_tables)]
    pub(super) tables: usize,
    /// Random seed for reproducible output
    #[arg(long)]
    pub(super) seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        treatments,
        replications,
        tables,
        seed,
        output,
    } = arg;

    let mut rng = match seed {
        Some(seed) => Pcg32::seed_from_u64(*seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let dataset = Dataset::random(*treatments, *replications, *tables, &mut rng);
    let request = AnalysisRequest::from_dataset(*treatments, *replications, *tables, &dataset);
    Output::save_json(&request, output.clone())?;

    eprintln!(
        "Generated {tables} tables of {replications} replications x {treatments} treatments"
    );
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    if let Some(seed) = seed {
        eprintln!("  Seed: {seed}");
    }
    Ok(())
}
