//! Profile export for the model-generation step.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::DemandProfile;

/// Column header for CSV profile export.
const HEADER: &str = "season,hour,fraction";

/// Output encoding for an exported profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format \"{other}\", available: csv, json")),
        }
    }
}

#[derive(Serialize)]
struct JsonProfile<'a> {
    grid: String,
    n_seasons: usize,
    n_hours: usize,
    values: Vec<&'a [f64]>,
}

/// Exports a profile to a file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_profile(
    profile: &DemandProfile,
    path: &Path,
    format: OutputFormat,
) -> Result<(), ProfileError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(profile, buf),
        OutputFormat::Json => write_json(profile, buf),
    }
}

/// Writes a profile as CSV, one row per time slice.
///
/// The `season` column holds the season name for the four-season grid and
/// the 1-based day of year for the daily grid.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(profile: &DemandProfile, writer: impl Write) -> Result<(), ProfileError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;
    for (row, values) in profile.rows().enumerate() {
        let label = profile.row_label(row);
        for (hour, value) in values.iter().enumerate() {
            wtr.write_record(&[label.clone(), hour.to_string(), format!("{value:.10}")])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a profile as a JSON object with a nested `values` grid.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(profile: &DemandProfile, mut writer: impl Write) -> Result<(), ProfileError> {
    let doc = JsonProfile {
        grid: profile.grid().to_string(),
        n_seasons: profile.n_seasons(),
        n_hours: profile.n_hours(),
        values: profile.rows().collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.flush()?;
    Ok(())
}
