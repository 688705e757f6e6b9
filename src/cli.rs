//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::grid::ProfileGrid;
use crate::io::export::OutputFormat;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub input: Option<PathBuf>,
    pub grid: Option<ProfileGrid>,
    pub out: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--input" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --input (expected a CSV file path)",
                )?;
                opts.input = Some(PathBuf::from(path));
            }
            "--grid" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --grid (expected a grid name)",
                )?;
                opts.grid = Some(name.parse()?);
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --out (expected a file path)",
                )?;
                opts.out = Some(PathBuf::from(path));
            }
            "--format" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --format (expected csv or json)",
                )?;
                opts.format = Some(name.parse()?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("genesys-profile: seasonal/hourly demand-distribution profiles");
    eprintln!();
    eprintln!("Usage: genesys-profile [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>    Load run configuration from a TOML file");
    eprintln!("  --preset <name>    Use a built-in preset (four_seasons, daily)");
    eprintln!("  --input <path>     Demand CSV with a `time` column and a value column");
    eprintln!("  --grid <name>      four_seasons_hourly or daily_hourly");
    eprintln!("  --out <path>       Write the profile to a file");
    eprintln!("  --format <name>    Output format: csv (default) or json");
    eprintln!("  --help             Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the four_seasons preset is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to adjust log output.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_config_cli() {
        let opts = parse_args_from(args(&["--config", "run.toml"])).expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("run.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_overrides() {
        let opts = parse_args_from(args(&[
            "--preset",
            "daily",
            "--input",
            "demand.csv",
            "--grid",
            "four_seasons_hourly",
            "--out",
            "profile.json",
            "--format",
            "json",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("daily"));
        assert_eq!(opts.grid, Some(ProfileGrid::FourSeasonsHourly));
        assert_eq!(opts.format, Some(OutputFormat::Json));
        assert!(opts.out.is_some());
    }

    #[test]
    fn config_and_preset_are_exclusive() {
        let err = parse_args_from(args(&["--config", "a.toml", "--preset", "daily"]));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(parse_args_from(args(&["--grid", "monthly"])).is_err());
        assert!(parse_args_from(args(&["--format", "xlsx"])).is_err());
        assert!(parse_args_from(args(&["--bogus"])).is_err());
        assert!(parse_args_from(args(&["--input"])).is_err());
    }
}
