//! Error taxonomy for profile construction.

use std::io;

/// Errors raised while reading a demand series or building a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The requested `(n_seasons, n_hours)` combination has no aggregation method.
    #[error(
        "unsupported grid {n_seasons} seasons x {n_hours} hours \
         (supported: 4 x 24 four_seasons_hourly, 365 x 24 daily_hourly)"
    )]
    UnsupportedGrid { n_seasons: usize, n_hours: usize },

    /// The source data does not have the expected two-column, time-indexed shape.
    #[error(
        "malformed input at line {line}: {reason} \
         (expected two columns: a \"time\" timestamp column and a numeric value column)"
    )]
    MalformedInput { line: u64, reason: String },

    /// Not enough data to produce a normalized profile.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProfileError;

    #[test]
    fn unsupported_grid_message_names_supported_shapes() {
        let err = ProfileError::UnsupportedGrid {
            n_seasons: 12,
            n_hours: 24,
        };
        let msg = err.to_string();
        assert!(msg.contains("12 seasons x 24 hours"));
        assert!(msg.contains("4 x 24"));
        assert!(msg.contains("365 x 24"));
    }

    #[test]
    fn malformed_message_names_expected_shape() {
        let msg = ProfileError::malformed(3, "bad timestamp").to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("\"time\""));
    }
}
