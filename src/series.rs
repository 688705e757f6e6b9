//! Time-indexed demand readings.

use chrono::NaiveDateTime;

/// A single demand reading.
///
/// `value` is `None` when the source cell was empty or not finite; such
/// readings are skipped by averages and treated as gaps when resampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub time: NaiveDateTime,
    pub value: Option<f64>,
}

impl Reading {
    /// Creates a reading; `NaN` and infinite values are stored as missing.
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self {
            time,
            value: value.is_finite().then_some(value),
        }
    }

    pub fn missing(time: NaiveDateTime) -> Self {
        Self { time, value: None }
    }
}

/// An ordered demand series at hourly or finer granularity.
///
/// Readings are sorted by timestamp on construction; the sort is stable so
/// duplicate timestamps keep their source order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use genesys_profile::series::{Reading, TimeSeries};
///
/// let t0 = NaiveDate::from_ymd_opt(2021, 1, 1)
///     .and_then(|d| d.and_hms_opt(1, 0, 0))
///     .unwrap();
/// let t1 = NaiveDate::from_ymd_opt(2021, 1, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let series = TimeSeries::new(vec![Reading::new(t0, 2.0), Reading::new(t1, 1.0)]);
/// assert_eq!(series.readings()[0].value, Some(1.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    readings: Vec<Reading>,
}

impl TimeSeries {
    pub fn new(mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.time);
        Self { readings }
    }

    /// Builds a series from `(timestamp, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        Self::new(pairs.into_iter().map(|(t, v)| Reading::new(t, v)).collect())
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// First and last timestamps, if any.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }

    /// Iterates over readings that carry a finite value.
    pub fn valid(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.readings.iter().filter_map(|r| {
            r.value
                .filter(|v| v.is_finite())
                .map(|v| (r.time, v))
        })
    }

    /// First reading with a negative value, if any.
    pub fn first_negative(&self) -> Option<&Reading> {
        self.readings
            .iter()
            .find(|r| r.value.is_some_and(|v| v < 0.0))
    }
}
