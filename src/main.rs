//! genesys-profile entry point: CLI wiring and config-driven profile construction.

use std::path::Path;
use std::process;

use tracing::info;

use genesys_profile::builder::DemandProfileBuilder;
use genesys_profile::cli::{self, CliOptions};
use genesys_profile::config::RunConfig;
use genesys_profile::error::ProfileError;
use genesys_profile::io::export::export_profile;
use genesys_profile::io::import::read_series_csv;
use genesys_profile::profile::DemandProfile;
use genesys_profile::telemetry::init_tracing;

/// Resolves the run configuration: `--config` first, then `--preset`, then
/// the four-season default, with command-line overrides applied on top.
fn load_config(cli: &CliOptions) -> Result<RunConfig, String> {
    let mut cfg = if let Some(ref path) = cli.config {
        RunConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        RunConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        RunConfig::four_seasons()
    };

    if let Some(ref path) = cli.input {
        cfg.input.path = Some(path.clone());
    }
    if let Some(grid) = cli.grid {
        cfg.grid = grid.into();
    }
    if let Some(ref path) = cli.out {
        cfg.output.path = Some(path.clone());
    }
    if let Some(format) = cli.format {
        cfg.output.format = format;
    }
    Ok(cfg)
}

/// Reads the configured series and builds its profile.
fn run(cfg: &RunConfig, input: &Path) -> Result<DemandProfile, ProfileError> {
    let grid = cfg.profile_grid()?;
    let series = read_series_csv(input, &cfg.input.time_column)?;
    info!(
        input = %input.display(),
        readings = series.len(),
        grid = %grid,
        "building demand profile"
    );
    DemandProfileBuilder::new(grid).build(&series)
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let Some(input) = cfg.input.path.as_deref() else {
        process::exit(1);
    };

    let profile = match run(&cfg, input) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{}", profile.summary());

    if let Some(ref path) = cfg.output.path {
        if let Err(e) = export_profile(&profile, path, cfg.output.format) {
            eprintln!("error: failed to write profile: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), format = %cfg.output.format, "profile written");
    }
}
