//! Baseline standardization.
//!
//! Two phases:
//!
//! 1. [`fit_baseline`]: mean and sample standard deviation of each indicator
//!    over rows dated on or before the baseline end.
//! 2. [`standardize`]: every row in the full range becomes
//!    `(v - mean) / sd` using those fixed parameters, so later observations
//!    can sit arbitrarily far from zero.
//!
//! An indicator whose baseline has fewer than two defined values or a zero
//! standard deviation is rejected instead of producing infinities.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{BaselineParams, Indicator, IndicatorRow, IndicatorStats, ZScoreRow};
use crate::error::AppError;
use crate::math::{mean, sample_sd};

/// Fit per-indicator baseline parameters over rows with `date <= baseline_end`.
///
/// Undefined cells are skipped indicator by indicator.
pub fn fit_baseline(rows: &[IndicatorRow], baseline_end: NaiveDate) -> Result<BaselineParams, AppError> {
    let baseline: Vec<&IndicatorRow> = rows.iter().filter(|r| r.date <= baseline_end).collect();

    let mut stats = BTreeMap::new();
    for indicator in Indicator::ALL {
        let values: Vec<f64> = baseline.iter().filter_map(|r| r.get(indicator)).collect();
        let (Some(m), Some(sd)) = (mean(&values), sample_sd(&values)) else {
            return Err(degenerate(indicator, format!(
                "{} defined value(s) on or before {baseline_end}; need at least 2",
                values.len()
            )));
        };
        if !(sd.is_finite() && sd > 0.0) {
            return Err(degenerate(indicator, format!(
                "standard deviation is {sd} over {} baseline values",
                values.len()
            )));
        }
        stats.insert(indicator, IndicatorStats { mean: m, sd, n: values.len() });
    }

    Ok(BaselineParams { baseline_end, stats })
}

/// Convert every row to z-scores with fixed baseline parameters.
pub fn standardize(rows: &[IndicatorRow], params: &BaselineParams) -> Vec<ZScoreRow> {
    rows.iter()
        .map(|row| {
            row.map_values(|indicator, v| match params.get(indicator) {
                Some(s) => (v - s.mean) / s.sd,
                None => f64::NAN,
            })
        })
        .collect()
}

fn degenerate(indicator: Indicator, detail: String) -> AppError {
    AppError::data(format!(
        "Degenerate baseline for {}: {detail}.",
        indicator.name()
    ))
}
