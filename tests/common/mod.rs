//! Shared synthetic series for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use genesys_profile::series::TimeSeries;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Midnight on January 1st of `year`.
pub fn start_of(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid timestamp")
}

/// Hourly timestamps starting at `start`.
pub fn hours_from(start: NaiveDateTime, hours: i64) -> impl Iterator<Item = NaiveDateTime> {
    (0..hours).map(move |h| start + TimeDelta::hours(h))
}

/// Hourly series from `start` whose value is computed from the timestamp.
pub fn hourly_series(
    start: NaiveDateTime,
    hours: i64,
    value: impl Fn(NaiveDateTime) -> f64,
) -> TimeSeries {
    TimeSeries::from_pairs(hours_from(start, hours).map(|t| (t, value(t))))
}

/// Hourly series of uniformly random demand in `[0.5, 2.0)` kW.
pub fn random_series(start: NaiveDateTime, hours: i64, seed: u64) -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    TimeSeries::from_pairs(
        hours_from(start, hours)
            .map(|t| (t, rng.random_range(0.5_f64..2.0)))
            .collect::<Vec<_>>(),
    )
}

/// Renders a series as `time,value` CSV text.
pub fn to_csv(series: &TimeSeries) -> String {
    let mut out = String::from("time,demand_kw\n");
    for r in series.readings() {
        let value = r.value.map(|v| v.to_string()).unwrap_or_default();
        out.push_str(&format!("{},{value}\n", r.time.format("%Y-%m-%d %H:%M:%S")));
    }
    out
}
