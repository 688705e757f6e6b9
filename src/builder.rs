//! Seasonal and daily hourly demand-distribution profiles.
//!
//! Answers the question "what fraction of annual demand is consumed in this
//! time slice?" for the two grids a model can request.

use chrono::{Datelike, Timelike};
use tracing::{debug, info, warn};

use crate::error::ProfileError;
use crate::grid::{HOURS_PER_DAY, HOURS_PER_YEAR, ProfileGrid};
use crate::profile::DemandProfile;
use crate::resample::resample_hourly;
use crate::season::Season;
use crate::series::TimeSeries;

/// Tolerance used when checking that a profile sums to one.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Builds demand profiles for a fixed grid.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use genesys_profile::builder::DemandProfileBuilder;
/// use genesys_profile::grid::ProfileGrid;
/// use genesys_profile::series::TimeSeries;
///
/// let start = NaiveDate::from_ymd_opt(2021, 1, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let series = TimeSeries::from_pairs((0..8760).map(|h| (start + TimeDelta::hours(h), 1.0)));
///
/// let profile = DemandProfileBuilder::new(ProfileGrid::FourSeasonsHourly)
///     .build(&series)
///     .unwrap();
/// assert_eq!(profile.as_slice().len(), 96);
/// assert!((profile.sum() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandProfileBuilder {
    grid: ProfileGrid,
}

impl DemandProfileBuilder {
    pub fn new(grid: ProfileGrid) -> Self {
        Self { grid }
    }

    /// Creates a builder from a model's time-slice dimensions.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnsupportedGrid` for unsupported dimensions.
    pub fn from_dimensions(n_seasons: usize, n_hours: usize) -> Result<Self, ProfileError> {
        ProfileGrid::from_dimensions(n_seasons, n_hours).map(Self::new)
    }

    pub fn grid(&self) -> ProfileGrid {
        self.grid
    }

    /// Computes the profile for `series`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for an empty series or negative demand and
    /// `InsufficientData` when no normalized profile can be formed.
    pub fn build(&self, series: &TimeSeries) -> Result<DemandProfile, ProfileError> {
        match self.grid {
            ProfileGrid::FourSeasonsHourly => four_seasons_hourly(series),
            ProfileGrid::DailyHourly => daily_hourly(series),
        }
    }
}

/// Builds the profile for a `(n_seasons, n_hours)` grid.
///
/// # Errors
///
/// Returns `UnsupportedGrid` unless the grid is `(4, 24)` or `(365, 24)`,
/// plus any error from [`DemandProfileBuilder::build`].
pub fn build_profile(
    series: &TimeSeries,
    n_seasons: usize,
    n_hours: usize,
) -> Result<DemandProfile, ProfileError> {
    DemandProfileBuilder::from_dimensions(n_seasons, n_hours)?.build(series)
}

fn validate_series(series: &TimeSeries) -> Result<(), ProfileError> {
    if series.is_empty() {
        return Err(ProfileError::malformed(0, "series has no readings"));
    }
    if let Some(r) = series.first_negative() {
        return Err(ProfileError::malformed(
            0,
            format!(
                "reading at {} has negative demand {}",
                r.time,
                r.value.unwrap_or_default()
            ),
        ));
    }
    Ok(())
}

/// Mean demand per (season, hour-of-day), normalized per season.
///
/// Each season's 24 hourly means are divided by `4 * season_total`, so a
/// season contributes a quarter of the grid regardless of its length.
/// Seasons without data, or with an all-zero mean vector, contribute a zero
/// row; hours missing from a season count as zero.
///
/// # Errors
///
/// Returns `MalformedInput` for an empty series or a negative value,
/// `InsufficientData` when every season is zero.
pub fn four_seasons_hourly(series: &TimeSeries) -> Result<DemandProfile, ProfileError> {
    validate_series(series)?;
    let grid = ProfileGrid::FourSeasonsHourly;
    let n_seasons = grid.n_seasons();

    let mut sums = vec![0.0_f64; grid.slice_count()];
    let mut counts = vec![0_usize; grid.slice_count()];
    for (t, v) in series.valid() {
        let Some(season) = Season::from_month(t.month()) else {
            continue;
        };
        let cell = season.index() * HOURS_PER_DAY + t.hour() as usize;
        sums[cell] += v;
        counts[cell] += 1;
    }

    let mut values = vec![0.0_f64; grid.slice_count()];
    let mut active_seasons = 0usize;
    for season in Season::ALL {
        let range = season.index() * HOURS_PER_DAY..(season.index() + 1) * HOURS_PER_DAY;
        let means: Vec<f64> = sums[range.clone()]
            .iter()
            .zip(&counts[range.clone()])
            .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
            .collect();
        let readings: usize = counts[range.clone()].iter().sum();
        let season_total: f64 = means.iter().sum();
        debug!(%season, readings, season_total, "grouped season");

        if season_total > 0.0 {
            active_seasons += 1;
            let scale = n_seasons as f64 * season_total;
            for (out, mean) in values[range].iter_mut().zip(&means) {
                *out = mean / scale;
            }
        }
    }

    if active_seasons == 0 {
        return Err(ProfileError::InsufficientData(
            "every season has zero or missing demand".to_string(),
        ));
    }

    let profile = finish(grid, values)?;
    let total = profile.sum();
    if (total - 1.0).abs() > SUM_TOLERANCE {
        warn!(
            total,
            active_seasons, "four-season profile does not sum to one"
        );
    }
    info!(grid = %grid, total, "built demand profile");
    Ok(profile)
}

/// Average hourly profile over all complete calendar years.
///
/// The series is resampled to hourly resolution with gaps interpolated,
/// split by calendar year, and every year with at least 8760 hours is
/// truncated to 8760 and averaged. Shorter years are dropped silently.
///
/// # Errors
///
/// Returns `MalformedInput` for an empty series or a negative value,
/// `InsufficientData` when no year is complete or the averaged demand is zero.
pub fn daily_hourly(series: &TimeSeries) -> Result<DemandProfile, ProfileError> {
    validate_series(series)?;
    let grid = ProfileGrid::DailyHourly;

    let hourly = resample_hourly(series).ok_or_else(|| {
        ProfileError::InsufficientData("series has no valid demand values".to_string())
    })?;

    let mut totals = vec![0.0_f64; HOURS_PER_YEAR];
    let mut complete_years = 0usize;
    for (year, values) in hourly.by_year() {
        if values.len() < HOURS_PER_YEAR {
            debug!(year, hours = values.len(), "dropping incomplete year");
            continue;
        }
        debug!(year, hours = values.len(), "using complete year");
        for (acc, v) in totals.iter_mut().zip(&values[..HOURS_PER_YEAR]) {
            *acc += v;
        }
        complete_years += 1;
    }

    if complete_years == 0 {
        return Err(ProfileError::InsufficientData(format!(
            "no calendar year has {HOURS_PER_YEAR} hourly readings"
        )));
    }

    let average: Vec<f64> = totals
        .into_iter()
        .map(|t| t / complete_years as f64)
        .collect();
    let total: f64 = average.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(ProfileError::InsufficientData(
            "average annual demand is zero".to_string(),
        ));
    }

    let values = average.into_iter().map(|v| v / total).collect();
    let profile = finish(grid, values)?;
    info!(grid = %grid, complete_years, "built demand profile");
    Ok(profile)
}

fn finish(grid: ProfileGrid, values: Vec<f64>) -> Result<DemandProfile, ProfileError> {
    DemandProfile::new(grid, values).ok_or_else(|| {
        ProfileError::InsufficientData(format!(
            "profile does not fill the {} x {} grid",
            grid.n_seasons(),
            grid.n_hours()
        ))
    })
}
