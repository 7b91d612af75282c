//! Regression engine: four Phillips-curve variants per tightness indicator.
//!
//! The z-score table is restricted to the estimation window, grouped into one
//! ordered series per indicator, and each group is fitted independently
//! (in parallel). The output order is fixed: indicators in
//! `Indicator::TIGHTNESS` order, variants in `ModelVariant::ALL` order.

use rayon::prelude::*;

use crate::domain::{ModelVariant, RegressionResult, RunConfig, ZScoreRow};
use crate::fit::fitter::fit_variant;
use crate::models::group_by_indicator;

/// Fit every (indicator, variant) pair.
pub fn fit_all(rows: &[ZScoreRow], config: &RunConfig) -> Vec<RegressionResult> {
    let groups = group_by_indicator(rows, config.estimation_end);
    log::info!(
        "fitting {} indicators x {} variants over {} rows (<= {})",
        groups.len(),
        ModelVariant::ALL.len(),
        groups.first().map(|g| g.len()).unwrap_or(0),
        config.estimation_end
    );

    let per_indicator: Vec<Vec<RegressionResult>> = groups
        .par_iter()
        .map(|series| {
            ModelVariant::ALL
                .iter()
                .map(|&variant| fit_variant(series, variant, config.lag))
                .collect()
        })
        .collect();

    per_indicator.into_iter().flatten().collect()
}
