//! CSV import of `time,value` demand series.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::ProfileError;
use crate::series::{Reading, TimeSeries};

/// Header name of the timestamp column unless configured otherwise.
pub const DEFAULT_TIME_COLUMN: &str = "time";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses a timestamp cell.
///
/// Accepts RFC 3339 and common `YYYY-MM-DD[ HH:MM[:SS[.fff]]]` layouts.
/// Offset-qualified timestamps keep their wall-clock time; the offset is dropped.
///
/// # Examples
///
/// ```
/// use genesys_profile::io::import::parse_timestamp;
///
/// assert!(parse_timestamp("2021-06-01 13:00:00").is_some());
/// assert!(parse_timestamp("2021-06-01T13:00:00Z").is_some());
/// assert!(parse_timestamp("2021-06-01").is_some());
/// assert!(parse_timestamp("June 1st").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a value cell; empty and `NaN` cells are missing.
fn parse_value(raw: &str, line: u64) -> Result<Option<f64>, ProfileError> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value: f64 = s
        .parse()
        .map_err(|_| ProfileError::malformed(line, format!("value \"{s}\" is not a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ProfileError::malformed(
            line,
            format!("value {s} must be a finite, non-negative number"),
        ));
    }
    Ok(Some(value))
}

/// Reads a demand series from a CSV file.
///
/// # Errors
///
/// Returns `ProfileError::Io` if the file cannot be opened and
/// `ProfileError::MalformedInput` if its shape or cells are invalid.
pub fn read_series_csv(path: &Path, time_column: &str) -> Result<TimeSeries, ProfileError> {
    let file = File::open(path).map_err(|e| {
        ProfileError::Io(io::Error::new(
            e.kind(),
            format!("cannot read \"{}\": {e}", path.display()),
        ))
    })?;
    let series = read_series(io::BufReader::new(file), time_column)?;
    debug!(path = %path.display(), readings = series.len(), "read demand series");
    Ok(series)
}

/// Reads a demand series from any CSV source.
///
/// Only the first two columns are used. One of them must be named
/// `time_column`; the other holds the demand values.
///
/// # Errors
///
/// Returns `ProfileError::MalformedInput` when the header lacks the time
/// column, a row has fewer than two fields, or a cell does not parse.
pub fn read_series(reader: impl Read, time_column: &str) -> Result<TimeSeries, ProfileError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(ProfileError::malformed(
            1,
            format!("header has {} column(s)", headers.len()),
        ));
    }
    let time_idx = headers
        .iter()
        .take(2)
        .position(|h| h == time_column)
        .ok_or_else(|| {
            ProfileError::malformed(
                1,
                format!("no \"{time_column}\" column among the first two columns"),
            )
        })?;
    let value_idx = 1 - time_idx;

    let mut readings = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let (Some(raw_time), Some(raw_value)) = (record.get(time_idx), record.get(value_idx))
        else {
            return Err(ProfileError::malformed(
                line,
                format!("row has {} field(s)", record.len()),
            ));
        };
        let time = parse_timestamp(raw_time).ok_or_else(|| {
            ProfileError::malformed(line, format!("timestamp \"{raw_time}\" cannot be parsed"))
        })?;
        readings.push(Reading {
            time,
            value: parse_value(raw_value, line)?,
        });
    }

    Ok(TimeSeries::new(readings))
}
