//! Shared pipeline logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! observations -> wide table -> indicators -> baseline z-scores -> regressions
//!
//! Each stage consumes the previous stage's table and produces a new one; no
//! stage mutates its input.

use crate::data::{FredClient, assemble_wide};
use crate::domain::{
    BaselineParams, IndicatorRow, RawObservation, RegressionResult, RunConfig, SeriesSpec,
    WideTable, ZScoreRow,
};
use crate::error::AppError;
use crate::fit::fit_all;
use crate::indicators::{derive_indicators, fit_baseline, standardize};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub wide: WideTable,
    pub indicators: Vec<IndicatorRow>,
    pub baseline: BaselineParams,
    pub zscores: Vec<ZScoreRow>,
    pub results: Vec<RegressionResult>,
}

/// Fetch the series from FRED, then run the full pipeline.
pub fn run_from_fred(
    client: &FredClient,
    specs: &[SeriesSpec],
    config: &RunConfig,
) -> Result<(Vec<RawObservation>, RunOutput), AppError> {
    let observations = client.fetch_all(specs)?;
    let output = run_pipeline(&observations, config)?;
    Ok((observations, output))
}

/// Execute the pipeline on pre-fetched observations.
///
/// This is useful for cached CSV input and synthetic panels.
pub fn run_pipeline(observations: &[RawObservation], config: &RunConfig) -> Result<RunOutput, AppError> {
    config.validate()?;

    // 1) Long -> wide.
    let wide = assemble_wide(observations);
    log::info!(
        "assembled {} dates x {} series from {} observations",
        wide.rows.len(),
        wide.columns.len(),
        observations.len()
    );

    // 2) Indicators inside the analysis window.
    let indicators = derive_indicators(&wide, config.start, config.end);
    if indicators.is_empty() {
        return Err(AppError::data(format!(
            "No observations fall inside the analysis window {}..={}.",
            config.start, config.end
        )));
    }
    log::info!("derived {} indicator rows", indicators.len());

    // 3) Baseline fit + z-scores over the full window.
    let baseline = fit_baseline(&indicators, config.baseline_end)?;
    let zscores = standardize(&indicators, &baseline);

    // 4) Regressions on the estimation window.
    let results = fit_all(&zscores, config);
    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        log::warn!("{failed} of {} models could not be estimated", results.len());
    }

    Ok(RunOutput {
        wide,
        indicators,
        baseline,
        zscores,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_window_is_a_data_error() {
        let obs = vec![RawObservation {
            series_id: "UNRATE".to_string(),
            date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            value: 5.0,
        }];
        let err = run_pipeline(&obs, &RunConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let config = RunConfig {
            lag: 0,
            ..RunConfig::default()
        };
        let err = run_pipeline(&[], &config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
    }
}
