use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::warn;
use ral_analysis::request::AnalysisRequest;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn save_text<F>(output_path: Option<PathBuf>, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Output) -> io::Result<()>,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_text(write)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_text<F>(&mut self, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        write(self).with_context(|| format!("Failed to write to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read an analysis request from a JSON file
///
/// Shape mismatches between the declared dimensions and the data are logged
/// as warnings; they never prevent the request from being loaded.
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_request_file<P>(path: P) -> anyhow::Result<AnalysisRequest>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let request: AnalysisRequest = read_json_file("analysis request", path)?;
    for mismatch in request.shape_mismatches() {
        warn!("{}: {mismatch}", path.display());
    }
    Ok(request)
}

fn parse_dimension(s: &str, kind: &str, min: usize) -> Result<usize, String> {
    let value = s
        .parse::<usize>()
        .map_err(|e| format!("invalid number of {kind}: {e}"))?;
    if value < min {
        return Err(format!("number of {kind} must be at least {min}"));
    }
    Ok(value)
}

pub fn parse_treatments(s: &str) -> Result<usize, String> {
    parse_dimension(s, "treatments", ral_analysis::request::MIN_TREATMENTS)
}

pub fn parse_replications(s: &str) -> Result<usize, String> {
    parse_dimension(s, "replications", ral_analysis::request::MIN_REPLICATIONS)
}

pub fn parse_tables(s: &str) -> Result<usize, String> {
    parse_dimension(s, "tables", ral_analysis::request::MIN_TABLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension_bounds() {
        assert_eq!(parse_treatments("2"), Ok(2));
        assert!(parse_treatments("1").is_err());
        assert_eq!(parse_replications("10"), Ok(10));
        assert!(parse_replications("0").is_err());
        assert_eq!(parse_tables("1"), Ok(1));
        assert!(parse_tables("0").is_err());
    }

    #[test]
    fn test_parse_dimension_rejects_non_numbers() {
        let err = parse_tables("three").unwrap_err();
        assert!(err.starts_with("invalid number of tables"));
        assert!(parse_treatments("-2").is_err());
    }
}
