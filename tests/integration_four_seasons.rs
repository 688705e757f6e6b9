//! Integration tests for the four-season hourly profile.

mod common;

use chrono::{Datelike, Timelike};
use genesys_profile::builder::{SUM_TOLERANCE, build_profile};
use genesys_profile::{ProfileError, ProfileGrid, Season};

#[test]
fn output_has_96_slices() {
    let series = common::random_series(common::start_of(2021), 8760, 7);
    let profile = build_profile(&series, 4, 24).expect("profile");
    assert_eq!(profile.grid(), ProfileGrid::FourSeasonsHourly);
    assert_eq!(profile.as_slice().len(), 96);
    assert_eq!(profile.rows().count(), 4);
}

#[test]
fn random_series_sum_to_one() {
    for seed in [1, 2, 3, 42] {
        let series = common::random_series(common::start_of(2019), 2 * 8760, seed);
        let profile = build_profile(&series, 4, 24).expect("profile");
        assert!(
            (profile.sum() - 1.0).abs() < SUM_TOLERANCE,
            "seed {seed}: sum {}",
            profile.sum()
        );
        assert!(profile.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn summer_only_demand_lands_in_summer_row() {
    let series = common::hourly_series(common::start_of(2021), 8760, |t| {
        if (6..=8).contains(&t.month()) { 1.0 } else { 0.0 }
    });
    let profile = build_profile(&series, 4, 24).expect("profile");

    let summer = profile.season(Season::Summer).expect("summer row");
    assert!(summer.iter().all(|v| *v > 0.0));
    for season in [Season::Spring, Season::Fall, Season::Winter] {
        let row = profile.season(season).expect("season row");
        assert!(row.iter().all(|v| *v == 0.0), "{season} should be empty");
    }
    // Each season is pre-divided by the season count.
    assert!((summer.iter().sum::<f64>() - 0.25).abs() < 1e-12);
}

#[test]
fn evening_peak_is_preserved() {
    let series = common::hourly_series(common::start_of(2021), 8760, |t| {
        if t.hour() == 18 { 5.0 } else { 1.0 }
    });
    let profile = build_profile(&series, 4, 24).expect("profile");
    let (_, hour, _) = profile.peak().expect("non-empty profile");
    assert_eq!(hour, 18);
    for row in profile.rows() {
        assert!((row[18] / row[0] - 5.0).abs() < 1e-9);
    }
}

#[test]
fn all_years_are_pooled() {
    // Year two doubles every reading; means pool both years, so the shape is unchanged.
    let series = common::hourly_series(common::start_of(2021), 2 * 8760, |t| {
        let level = if t.year() == 2021 { 1.0 } else { 2.0 };
        level * (1.0 + t.hour() as f64)
    });
    let one_year = common::hourly_series(common::start_of(2021), 8760, |t| 1.0 + t.hour() as f64);
    let pooled = build_profile(&series, 4, 24).expect("profile");
    let single = build_profile(&one_year, 4, 24).expect("profile");
    for (a, b) in pooled.as_slice().iter().zip(single.as_slice()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn unsupported_grid_fails() {
    let series = common::random_series(common::start_of(2021), 48, 3);
    assert!(matches!(
        build_profile(&series, 12, 24),
        Err(ProfileError::UnsupportedGrid {
            n_seasons: 12,
            n_hours: 24
        })
    ));
}

#[test]
fn input_is_not_mutated() {
    let series = common::random_series(common::start_of(2021), 500, 11);
    let before = series.clone();
    let first = build_profile(&series, 4, 24).expect("profile");
    let second = build_profile(&series, 4, 24).expect("profile");
    assert_eq!(series, before);
    assert_eq!(first, second);
}
