use clap::{Parser, Subcommand};

use self::{
    analyze::AnalyzeArg, export::ExportArg, generate::GenerateArg, report::ReportArg,
    resize::ResizeArg,
};

mod analyze;
mod export;
mod generate;
mod report;
mod resize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze every table of a request and write the results
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Print a human-readable analysis report
    Report(#[clap(flatten)] ReportArg),
    /// Generate a request filled with random observations
    Generate(#[clap(flatten)] GenerateArg),
    /// Change the dimensions of a request, keeping overlapping observations
    Resize(#[clap(flatten)] ResizeArg),
    /// Export the input tables of a request as tab-separated text
    Export(#[clap(flatten)] ExportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Resize(arg) => resize::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
    }
    Ok(())
}
