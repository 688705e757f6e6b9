//! Seasonal and daily hourly demand-distribution profiles for energy-system models.
//!
//! Converts an hourly demand time series into the fraction of annual demand
//! falling in each time slice of a `4 x 24` or `365 x 24` grid.

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
/// CSV import of demand series and profile export.
pub mod io;
pub mod profile;
pub mod resample;
pub mod season;
pub mod series;
pub mod telemetry;

pub use builder::{DemandProfileBuilder, build_profile, daily_hourly, four_seasons_hourly};
pub use error::ProfileError;
pub use grid::ProfileGrid;
pub use profile::DemandProfile;
pub use season::Season;
pub use series::{Reading, TimeSeries};
