use chrono::NaiveDate;

use labor_tightness::app::pipeline::run_pipeline;
use labor_tightness::data::{SampleConfig, generate_panel};
use labor_tightness::domain::{
    Indicator, ModelVariant, RawObservation, RunConfig, SERIES_JOB_OPENINGS, SERIES_QUITS,
};
use labor_tightness::error::{EXIT_DATA, FitError};
use labor_tightness::io::{SummaryFile, load_observations_csv, read_summary_json, write_observations_csv, write_summary_json};

fn panel() -> Vec<RawObservation> {
    generate_panel(&SampleConfig::default()).unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("labor_tightness_it_{}_{name}", std::process::id()));
    path
}

#[test]
fn synthetic_panel_produces_the_full_table() {
    let run = run_pipeline(&panel(), &RunConfig::default()).unwrap();

    // 80 quarters from 2001Q1 end at 2020Q4, inside the analysis window.
    assert_eq!(run.indicators.len(), 80);
    assert_eq!(run.zscores.len(), 80);
    assert_eq!(run.results.len(), 16);

    let mut expected = Vec::new();
    for indicator in Indicator::TIGHTNESS {
        for variant in ModelVariant::ALL {
            expected.push((indicator, variant));
        }
    }
    let got: Vec<_> = run.results.iter().map(|r| (r.indicator, r.variant)).collect();
    assert_eq!(got, expected);

    for r in &run.results {
        let stats = r.outcome.as_ref().unwrap();
        // 76 quarters up to 2019Q4, minus the four lagged ones.
        assert_eq!(stats.n_obs, 72);
        assert!(stats.adj_r_squared.is_finite());
        assert!(stats.adj_r_squared <= 1.0);
        assert!(stats.r_squared >= 0.0 && stats.r_squared <= 1.0);
        assert!(stats.adj_r_squared <= stats.r_squared);
    }
}

#[test]
fn baseline_z_scores_are_centered() {
    let config = RunConfig::default();
    let run = run_pipeline(&panel(), &config).unwrap();

    for indicator in Indicator::ALL {
        let z: Vec<f64> = run
            .zscores
            .iter()
            .filter(|r| r.date <= config.baseline_end)
            .filter_map(|r| r.get(indicator))
            .collect();
        let mean = z.iter().sum::<f64>() / z.len() as f64;
        assert!(mean.abs() < 1e-9, "{} mean {mean}", indicator.name());
    }
}

#[test]
fn missing_series_is_a_degenerate_baseline() {
    let obs: Vec<RawObservation> = panel()
        .into_iter()
        .filter(|o| o.series_id != SERIES_JOB_OPENINGS)
        .collect();
    let err = run_pipeline(&obs, &RunConfig::default()).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_DATA);
    assert!(err.message().contains("upjo"));
}

#[test]
fn late_starting_series_fits_on_fewer_rows() {
    let cutoff = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();
    let obs: Vec<RawObservation> = panel()
        .into_iter()
        .filter(|o| !(o.series_id == SERIES_QUITS && o.date < cutoff))
        .collect();
    let run = run_pipeline(&obs, &RunConfig::default()).unwrap();

    for r in &run.results {
        let n = r.outcome.as_ref().unwrap().n_obs;
        match r.indicator {
            // qr starts at 2008Q1; its first lagged value lands on 2009Q1.
            Indicator::Qr => assert_eq!(n, 44),
            _ => assert_eq!(n, 72),
        }
    }
}

#[test]
fn short_estimation_window_fails_per_model() {
    let config = RunConfig {
        estimation_end: NaiveDate::from_ymd_opt(2002, 3, 31).unwrap(),
        ..RunConfig::default()
    };
    let run = run_pipeline(&panel(), &config).unwrap();
    assert_eq!(run.results.len(), 16);
    // Five quarters leave one complete row after the lag.
    for r in &run.results {
        let required = r.variant.n_regressors() + 2;
        assert_eq!(
            r.outcome,
            Err(FitError::InsufficientObservations { n: 1, required })
        );
    }
}

#[test]
fn cached_csv_reproduces_the_live_run() {
    let obs = panel();
    let path = temp_path("obs.csv");
    write_observations_csv(&path, &obs).unwrap();
    let ingested = load_observations_csv(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(ingested.row_errors.is_empty());
    assert_eq!(ingested.rows_read, obs.len());

    let config = RunConfig::default();
    let direct = run_pipeline(&obs, &config).unwrap();
    let cached = run_pipeline(&ingested.observations, &config).unwrap();
    for (a, b) in direct.results.iter().zip(&cached.results) {
        let (a, b) = (a.outcome.as_ref().unwrap(), b.outcome.as_ref().unwrap());
        assert_eq!(a.n_obs, b.n_obs);
        assert!((a.adj_r_squared - b.adj_r_squared).abs() < 1e-9);
    }
}

#[test]
fn summary_json_carries_the_run() {
    let config = RunConfig::default();
    let run = run_pipeline(&panel(), &config).unwrap();
    let summary = SummaryFile::new("synthetic", &config, &run.baseline, &run.results);

    let path = temp_path("summary.json");
    write_summary_json(&path, &summary).unwrap();
    let back = read_summary_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back.results.len(), 16);
    assert_eq!(back.windows.baseline_end, config.baseline_end);
    assert_eq!(back.baseline.stats.len(), Indicator::ALL.len());
}
