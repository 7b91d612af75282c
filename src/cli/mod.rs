//! Command-line parsing for the tightness / Phillips-curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data and regression code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tight",
    version,
    about = "Labor-market tightness indicators vs. inflation (FRED-based Phillips curves)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the series from FRED (or load a cached CSV), fit, and print the table.
    Run(RunArgs),
    /// Run the full pipeline on a seeded synthetic panel (no network).
    Demo(DemoArgs),
    /// Download the series from FRED into a long-format CSV.
    Fetch(FetchArgs),
    /// Print the results table from a previously exported summary JSON.
    Show(ShowArgs),
}

/// Analysis windows and output options shared by `run` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct AnalysisArgs {
    /// First date kept for the indicators (inclusive).
    #[arg(long, default_value = "2001-01-01")]
    pub start: NaiveDate,

    /// Last date kept for the indicators (inclusive).
    #[arg(long, default_value = "2021-07-31")]
    pub end: NaiveDate,

    /// Last date of the standardization baseline (inclusive).
    #[arg(long, default_value = "2018-12-31")]
    pub baseline_end: NaiveDate,

    /// Last date used to estimate the regressions (inclusive).
    #[arg(long, default_value = "2019-12-31")]
    pub estimation_end: NaiveDate,

    /// Lag (periods) applied to the regressors.
    #[arg(long, default_value_t = 4)]
    pub lag: usize,

    /// Render an ASCII plot of the tightness z-scores.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export z-score rows to CSV.
    #[arg(long = "export-zscores", value_name = "CSV")]
    pub export_zscores: Option<PathBuf>,

    /// Export the regression table to CSV.
    #[arg(long = "export-results", value_name = "CSV")]
    pub export_results: Option<PathBuf>,

    /// Export windows, baseline parameters and regression outcomes to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `tight run`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Read observations from a CSV (`series_id,date,value`) instead of FRED.
    #[arg(short = 'f', long = "from-csv", value_name = "CSV")]
    pub from_csv: Option<PathBuf>,

    /// Save the fetched observations to CSV for later `--from-csv` runs.
    #[arg(long = "save-observations", value_name = "CSV")]
    pub save_observations: Option<PathBuf>,
}

/// Options for `tight demo`.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Random seed for the synthetic panel.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of quarters in the synthetic panel (starting at `--start`).
    #[arg(long, default_value_t = 80)]
    pub quarters: usize,
}

/// Options for `tight fetch`.
#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}

/// Options for `tight show`.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Summary JSON produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_published_windows() {
        let cli = Cli::parse_from(["tight", "run"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.analysis.start, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(args.analysis.end, NaiveDate::from_ymd_opt(2021, 7, 31).unwrap());
        assert_eq!(args.analysis.lag, 4);
        assert!(!args.analysis.plot);
        assert!(args.from_csv.is_none());
    }

    #[test]
    fn demo_accepts_overrides() {
        let cli = Cli::parse_from([
            "tight", "demo", "--seed", "7", "--quarters", "40", "--baseline-end", "2005-12-31", "--plot",
        ]);
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.seed, 7);
        assert_eq!(args.quarters, 40);
        assert_eq!(args.analysis.baseline_end, NaiveDate::from_ymd_opt(2005, 12, 31).unwrap());
        assert!(args.analysis.plot);
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["tight", "run", "--start", "2001/01/01"]).is_err());
    }
}
