//! Normalized demand-distribution grids and their summary report.

use std::fmt;

use serde::Serialize;

use crate::grid::ProfileGrid;
use crate::season::Season;

/// Fraction of annual demand falling in each time slice.
///
/// Stored row-major: row `i` is a season (four-season grid) or a day of the
/// year (daily grid), column `j` is the hour of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandProfile {
    grid: ProfileGrid,
    values: Vec<f64>,
}

impl DemandProfile {
    /// Wraps a flat row-major vector.
    ///
    /// Returns `None` if `values` does not match the grid's slice count.
    pub fn new(grid: ProfileGrid, values: Vec<f64>) -> Option<Self> {
        (values.len() == grid.slice_count()).then_some(Self { grid, values })
    }

    pub fn grid(&self) -> ProfileGrid {
        self.grid
    }

    pub fn n_seasons(&self) -> usize {
        self.grid.n_seasons()
    }

    pub fn n_hours(&self) -> usize {
        self.grid.n_hours()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Total over the whole grid.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Value of one time slice, `None` when out of range.
    pub fn get(&self, row: usize, hour: usize) -> Option<f64> {
        if row >= self.n_seasons() || hour >= self.n_hours() {
            return None;
        }
        self.values.get(row * self.n_hours() + hour).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let n = self.n_hours();
        self.values.get(row * n..(row + 1) * n)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.n_hours())
    }

    /// Four-season row for `season`; `None` on a daily grid.
    pub fn season(&self, season: Season) -> Option<&[f64]> {
        match self.grid {
            ProfileGrid::FourSeasonsHourly => self.row(season.index()),
            ProfileGrid::DailyHourly => None,
        }
    }

    /// Label of a row: the season name, or the 1-based day of year.
    pub fn row_label(&self, row: usize) -> String {
        match self.grid {
            ProfileGrid::FourSeasonsHourly => Season::ALL
                .get(row)
                .map_or_else(|| row.to_string(), |s| s.name().to_string()),
            ProfileGrid::DailyHourly => (row + 1).to_string(),
        }
    }

    /// Largest slice as `(row, hour, value)`.
    pub fn peak(&self) -> Option<(usize, usize, f64)> {
        let n = self.n_hours();
        self.values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, v)| (i / n, i % n, v))
    }

    pub fn summary(&self) -> ProfileSummary {
        let row_totals = match self.grid {
            ProfileGrid::FourSeasonsHourly => self
                .rows()
                .enumerate()
                .map(|(i, r)| (self.row_label(i), r.iter().sum()))
                .collect(),
            ProfileGrid::DailyHourly => Vec::new(),
        };
        ProfileSummary {
            grid: self.grid,
            slices: self.values.len(),
            total: self.sum(),
            peak: self
                .peak()
                .map(|(row, hour, value)| (self.row_label(row), hour, value)),
            row_totals,
        }
    }
}

/// Printable digest of a profile.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub grid: ProfileGrid,
    pub slices: usize,
    pub total: f64,
    /// `(row label, hour, fraction)` of the largest slice.
    pub peak: Option<(String, usize, f64)>,
    /// Per-season totals; empty for the daily grid.
    pub row_totals: Vec<(String, f64)>,
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Demand Profile ---")?;
        writeln!(f, "Grid:          {}", self.grid)?;
        writeln!(f, "Time slices:   {}", self.slices)?;
        writeln!(f, "Total:         {:.6}", self.total)?;
        if let Some((label, hour, value)) = &self.peak {
            writeln!(f, "Peak slice:    {label} hour {hour} ({value:.6})")?;
        }
        for (label, total) in &self.row_totals {
            writeln!(f, "  {label:<8} {total:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_season_ramp() -> DemandProfile {
        let values: Vec<f64> = (0..96).map(|i| i as f64).collect();
        DemandProfile::new(ProfileGrid::FourSeasonsHourly, values).expect("96 values")
    }

    #[test]
    fn new_rejects_wrong_length() {
        assert!(DemandProfile::new(ProfileGrid::FourSeasonsHourly, vec![0.0; 95]).is_none());
        assert!(DemandProfile::new(ProfileGrid::DailyHourly, vec![0.0; 8760]).is_some());
    }

    #[test]
    fn rows_and_cells_are_row_major() {
        let p = four_season_ramp();
        assert_eq!(p.get(1, 0), Some(24.0));
        assert_eq!(p.get(3, 23), Some(95.0));
        assert_eq!(p.get(4, 0), None);
        assert_eq!(p.get(0, 24), None);
        assert_eq!(p.season(Season::Summer).map(|r| r[2]), Some(26.0));
        assert_eq!(p.rows().count(), 4);
    }

    #[test]
    fn peak_reports_row_and_hour() {
        let p = four_season_ramp();
        assert_eq!(p.peak(), Some((3, 23, 95.0)));
    }

    #[test]
    fn row_labels_follow_grid() {
        let p = four_season_ramp();
        assert_eq!(p.row_label(0), "spring");
        assert_eq!(p.row_label(3), "winter");
        let daily =
            DemandProfile::new(ProfileGrid::DailyHourly, vec![0.0; 8760]).expect("8760 values");
        assert_eq!(daily.row_label(0), "1");
        assert_eq!(daily.row_label(364), "365");
        assert!(daily.season(Season::Spring).is_none());
    }

    #[test]
    fn summary_lists_season_totals() {
        let values = vec![1.0 / 96.0; 96];
        let p = DemandProfile::new(ProfileGrid::FourSeasonsHourly, values).expect("96 values");
        let text = p.summary().to_string();
        assert!(text.contains("four_seasons_hourly"));
        assert!(text.contains("Total:         1.000000"));
        assert!(text.contains("summer"));
        assert!(text.contains("0.250000"));
    }
}
