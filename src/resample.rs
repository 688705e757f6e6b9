//! Hourly resampling with linear gap interpolation.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

use crate::series::TimeSeries;

/// A gap-free series on an exact hourly grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    start: NaiveDateTime,
    values: Vec<f64>,
}

impl HourlySeries {
    /// Timestamp of the first hour bucket.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Splits the series into contiguous calendar-year runs.
    ///
    /// Returns `(year, values)` pairs in chronological order.
    pub fn by_year(&self) -> Vec<(i32, &[f64])> {
        let mut years = Vec::new();
        let mut run_start = 0usize;
        let mut current = self.start.year();

        for i in 0..self.values.len() {
            let year = (self.start + TimeDelta::hours(i as i64)).year();
            if year != current {
                years.push((current, &self.values[run_start..i]));
                run_start = i;
                current = year;
            }
        }
        if run_start < self.values.len() {
            years.push((current, &self.values[run_start..]));
        }
        years
    }
}

/// Truncates a timestamp to the start of its hour.
pub fn floor_hour(t: NaiveDateTime) -> NaiveDateTime {
    t.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Resamples a series onto an hourly grid.
///
/// Each bucket `[h, h + 1)` holds the mean of the valid readings inside it.
/// Empty buckets are filled by linear interpolation between the nearest
/// valid buckets; buckets before the first or after the last valid one take
/// that bucket's value.
///
/// Returns `None` when the series has no valid readings.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use genesys_profile::resample::resample_hourly;
/// use genesys_profile::series::TimeSeries;
///
/// let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let series = TimeSeries::from_pairs([
///     (day.and_hms_opt(0, 0, 0).unwrap(), 1.0),
///     (day.and_hms_opt(3, 0, 0).unwrap(), 4.0),
/// ]);
/// let hourly = resample_hourly(&series).unwrap();
/// assert_eq!(hourly.values(), &[1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn resample_hourly(series: &TimeSeries) -> Option<HourlySeries> {
    let (first, last) = series.span()?;
    let start = floor_hour(first);
    let n = (floor_hour(last) - start).num_hours() as usize + 1;

    let mut sums = vec![0.0_f64; n];
    let mut counts = vec![0_usize; n];
    for (t, v) in series.valid() {
        let i = (floor_hour(t) - start).num_hours() as usize;
        sums[i] += v;
        counts[i] += 1;
    }

    let buckets: Vec<Option<f64>> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| (c > 0).then(|| s / c as f64))
        .collect();

    let values = interpolate_linear(&buckets)?;
    Some(HourlySeries { start, values })
}

/// Fills `None` entries by linear interpolation over equally spaced points.
///
/// Leading and trailing gaps take the nearest valid value. Returns `None`
/// if there is no valid point at all.
pub fn interpolate_linear(points: &[Option<f64>]) -> Option<Vec<f64>> {
    let first_valid = points.iter().position(Option::is_some)?;
    let mut out = Vec::with_capacity(points.len());
    let mut prev: Option<(usize, f64)> = None;
    // Next valid point after the current gap, looked up once per gap.
    // `Some(None)` marks a trailing gap with no later valid point.
    let mut next: Option<Option<(usize, f64)>> = None;

    for (i, point) in points.iter().enumerate() {
        match (point, prev) {
            (Some(v), _) => {
                out.push(*v);
                prev = Some((i, *v));
                next = None;
            }
            (None, None) => {
                out.push(points[first_valid].unwrap_or_default());
            }
            (None, Some((pi, pv))) => {
                let upcoming = *next.get_or_insert_with(|| {
                    points[i..]
                        .iter()
                        .enumerate()
                        .find_map(|(k, p)| p.map(|v| (i + k, v)))
                });
                match upcoming {
                    Some((ni, nv)) => {
                        let frac = (i - pi) as f64 / (ni - pi) as f64;
                        out.push(pv + (nv - pv) * frac);
                    }
                    None => out.push(pv),
                }
            }
        }
    }
    Some(out)
}
