//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches FRED data, loads a cached CSV, or generates a synthetic panel
//! - runs the indicator / z-score / regression pipeline
//! - prints the report and optional plot
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalysisArgs, Command, DemoArgs, FetchArgs, RunArgs, ShowArgs};
use crate::data::{FredClient, SampleConfig, generate_panel};
use crate::domain::{Indicator, RunConfig, default_series};
use crate::error::AppError;
use crate::io::summary::{RunWindows, SummaryFile};

pub mod pipeline;

use pipeline::RunOutput;

/// Entry point for the `tight` binary.
pub fn run() -> Result<(), AppError> {
    // `tight` and `tight --plot` behave like `tight run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Demo(args) => handle_demo(args),
        Command::Fetch(args) => handle_fetch(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.analysis);
    config.validate()?;

    let (source, observations, run) = match &args.from_csv {
        Some(path) => {
            let ingested = crate::io::load_observations_csv(path)?;
            if !ingested.row_errors.is_empty() {
                eprintln!(
                    "Skipped {} of {} CSV rows (run with RUST_LOG=warn for details).",
                    ingested.row_errors.len(),
                    ingested.rows_read
                );
            }
            let run = pipeline::run_pipeline(&ingested.observations, &config)?;
            (format!("CSV {}", path.display()), ingested.observations, run)
        }
        None => {
            let client = FredClient::from_env()?;
            let specs = default_series();
            let (observations, run) = pipeline::run_from_fred(&client, &specs, &config)?;
            (format!("FRED ({} quarterly series)", specs.len()), observations, run)
        }
    };

    if let Some(path) = &args.save_observations {
        crate::io::write_observations_csv(path, &observations)?;
    }

    report(&source, &run, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.analysis);
    let sample = SampleConfig {
        start: config.start,
        quarters: args.quarters,
        seed: args.seed,
    };
    let observations = generate_panel(&sample)?;
    let run = pipeline::run_pipeline(&observations, &config)?;
    let source = format!(
        "synthetic panel (seed={}, {} quarters)",
        sample.seed, sample.quarters
    );
    report(&source, &run, &config)
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let client = FredClient::from_env()?;
    let observations = client.fetch_all(&default_series())?;
    crate::io::write_observations_csv(&args.out, &observations)?;
    println!(
        "Wrote {} observations to {}",
        observations.len(),
        args.out.display()
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let summary = crate::io::read_summary_json(&args.summary)?;
    println!(
        "{}",
        crate::report::format_run_header(&summary.source, &summary.windows, &summary.baseline)
    );
    println!("{}", crate::report::format_results_table(&summary.results));
    Ok(())
}

/// Print the header, table and optional plot, then write the requested exports.
fn report(source: &str, run: &RunOutput, config: &RunConfig) -> Result<(), AppError> {
    println!(
        "{}",
        crate::report::format_run_header(source, &RunWindows::from(config), &run.baseline)
    );
    println!("{}", crate::report::format_results_table(&run.results));

    if config.plot {
        let plot = crate::plot::render_zscore_plot(
            &run.zscores,
            &Indicator::TIGHTNESS,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_zscores {
        crate::io::write_zscores_csv(path, &run.zscores)?;
    }
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.results)?;
    }
    if let Some(path) = &config.export_json {
        let summary = SummaryFile::new(source, config, &run.baseline, &run.results);
        crate::io::write_summary_json(path, &summary)?;
    }

    Ok(())
}

pub fn run_config_from_args(args: &AnalysisArgs) -> RunConfig {
    RunConfig {
        start: args.start,
        end: args.end,
        baseline_end: args.baseline_end,
        estimation_end: args.estimation_end,
        lag: args.lag,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_zscores: args.export_zscores.clone(),
        export_results: args.export_results.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `tight` defaults to `tight run`.
///
/// Rules:
/// - `tight`                      -> `tight run`
/// - `tight --plot ...`           -> `tight run --plot ...`
/// - `tight --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "demo" | "fetch" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
