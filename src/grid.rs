//! Supported profile grids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Hours in a profile year; daily mode always produces `365 * 24` slices.
pub const HOURS_PER_YEAR: usize = 8760;

/// Hour-of-day resolution shared by both grids.
pub const HOURS_PER_DAY: usize = 24;

/// Aggregation mode selected by the model's `(n_seasons, n_hours)` time slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileGrid {
    /// 4 seasons x 24 hours.
    FourSeasonsHourly,
    /// 365 days x 24 hours.
    DailyHourly,
}

impl ProfileGrid {
    pub const NAMES: &[&str] = &["four_seasons_hourly", "daily_hourly"];

    /// Resolves a grid from its dimensions.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnsupportedGrid` for anything other than
    /// `(4, 24)` or `(365, 24)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use genesys_profile::grid::ProfileGrid;
    ///
    /// assert_eq!(
    ///     ProfileGrid::from_dimensions(4, 24).ok(),
    ///     Some(ProfileGrid::FourSeasonsHourly)
    /// );
    /// assert!(ProfileGrid::from_dimensions(12, 24).is_err());
    /// ```
    pub fn from_dimensions(n_seasons: usize, n_hours: usize) -> Result<Self, ProfileError> {
        match (n_seasons, n_hours) {
            (4, HOURS_PER_DAY) => Ok(Self::FourSeasonsHourly),
            (365, HOURS_PER_DAY) => Ok(Self::DailyHourly),
            _ => Err(ProfileError::UnsupportedGrid { n_seasons, n_hours }),
        }
    }

    /// Number of rows in the grid.
    pub fn n_seasons(self) -> usize {
        match self {
            Self::FourSeasonsHourly => 4,
            Self::DailyHourly => 365,
        }
    }

    /// Number of columns in the grid.
    pub fn n_hours(self) -> usize {
        HOURS_PER_DAY
    }

    /// Total number of time slices.
    pub fn slice_count(self) -> usize {
        self.n_seasons() * self.n_hours()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FourSeasonsHourly => "four_seasons_hourly",
            Self::DailyHourly => "daily_hourly",
        }
    }
}

impl fmt::Display for ProfileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileGrid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "four_seasons_hourly" => Ok(Self::FourSeasonsHourly),
            "daily_hourly" => Ok(Self::DailyHourly),
            other => Err(format!(
                "unknown grid \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_dimensions_resolve() {
        assert_eq!(
            ProfileGrid::from_dimensions(4, 24).ok(),
            Some(ProfileGrid::FourSeasonsHourly)
        );
        assert_eq!(
            ProfileGrid::from_dimensions(365, 24).ok(),
            Some(ProfileGrid::DailyHourly)
        );
    }

    #[test]
    fn unsupported_dimensions_are_an_error() {
        for (s, h) in [(12, 24), (4, 12), (365, 1), (0, 0)] {
            let result = ProfileGrid::from_dimensions(s, h);
            assert!(
                matches!(
                    result,
                    Err(ProfileError::UnsupportedGrid { n_seasons, n_hours })
                        if n_seasons == s && n_hours == h
                ),
                "({s}, {h}) should be unsupported"
            );
        }
    }

    #[test]
    fn lengths_match_grid_shape() {
        assert_eq!(ProfileGrid::FourSeasonsHourly.slice_count(), 96);
        assert_eq!(ProfileGrid::DailyHourly.slice_count(), HOURS_PER_YEAR);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for name in ProfileGrid::NAMES {
            let grid: Result<ProfileGrid, _> = name.parse();
            assert_eq!(grid.map(|g| g.name()).ok(), Some(*name));
        }
        assert!("monthly".parse::<ProfileGrid>().is_err());
    }
}
