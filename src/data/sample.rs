//! Synthetic quarterly panel of the eight indicator source series.
//!
//! Used by `tight demo` and by tests so the full pipeline can run without
//! network access. The panel is driven by one latent AR(1) "slack" cycle:
//! labor-market series load on the current slack, and inflation responds to
//! slack four quarters earlier plus its own persistence. Output is fully
//! determined by the seed.

use chrono::{Months, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    RawObservation, SERIES_CORE_CPI, SERIES_CORE_PCE, SERIES_JOB_OPENINGS, SERIES_PAYROLLS,
    SERIES_PRIME_AGE_EPOP, SERIES_QUITS, SERIES_UNEMPLOYED, SERIES_UNRATE,
};
use crate::error::AppError;

/// Persistence of the latent slack cycle.
const SLACK_AR: f64 = 0.85;
/// Inflation persistence around its 2% anchor.
const INFLATION_AR: f64 = 0.5;
/// Response of inflation to slack four quarters earlier.
const INFLATION_SLACK_LOAD: f64 = -0.35;
/// Labor force (thousands) used to turn the unemployment rate into a level.
const LABOR_FORCE: f64 = 160_000.0;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// First quarter of the panel (quarter start date).
    pub start: NaiveDate,
    pub quarters: usize,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap_or_default(),
            quarters: 80,
            seed: 42,
        }
    }
}

/// Generate a long-format panel: one observation per series per quarter.
pub fn generate_panel(config: &SampleConfig) -> Result<Vec<RawObservation>, AppError> {
    if config.quarters == 0 {
        return Err(AppError::config("Synthetic panel needs at least one quarter."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let shock = Normal::new(0.0, 0.4)
        .map_err(|e| AppError::io(format!("Noise distribution error: {e}")))?;
    let noise = Normal::new(0.0, 0.05)
        .map_err(|e| AppError::io(format!("Noise distribution error: {e}")))?;

    let mut slack_hist: Vec<f64> = Vec::with_capacity(config.quarters);
    let mut slack = 0.0;
    let mut cpi_gap = 0.0;
    let mut out = Vec::with_capacity(config.quarters * 8);

    for q in 0..config.quarters {
        let date = quarter_date(config.start, q)?;

        slack = SLACK_AR * slack + shock.sample(&mut rng);
        slack_hist.push(slack);
        let slack_lag4 = if q >= 4 { slack_hist[q - 4] } else { 0.0 };

        let unrate = (5.0 + 1.5 * slack + noise.sample(&mut rng)).max(2.0);
        let epop = 79.0 - 1.2 * slack + noise.sample(&mut rng);
        let unemployed = LABOR_FORCE * unrate / 100.0;
        let openings = (6_000.0 - 1_200.0 * slack + 50.0 * noise.sample(&mut rng)).max(500.0);
        let quits = (3_000.0 - 400.0 * slack + 20.0 * noise.sample(&mut rng)).max(200.0);
        let payrolls = 140_000.0 - 2_500.0 * slack + 100.0 * noise.sample(&mut rng);

        cpi_gap = INFLATION_AR * cpi_gap + INFLATION_SLACK_LOAD * slack_lag4 + noise.sample(&mut rng);
        let cpi = 2.0 + cpi_gap;
        let pce = 1.7 + 0.9 * cpi_gap + noise.sample(&mut rng);

        let row = [
            (SERIES_UNRATE, unrate),
            (SERIES_PRIME_AGE_EPOP, epop),
            (SERIES_UNEMPLOYED, unemployed),
            (SERIES_JOB_OPENINGS, openings),
            (SERIES_QUITS, quits),
            (SERIES_PAYROLLS, payrolls),
            (SERIES_CORE_CPI, cpi),
            (SERIES_CORE_PCE, pce),
        ];
        for (series_id, value) in row {
            out.push(RawObservation {
                series_id: series_id.to_string(),
                date,
                value,
            });
        }
    }

    Ok(out)
}

fn quarter_date(start: NaiveDate, q: usize) -> Result<NaiveDate, AppError> {
    let months = u32::try_from(q * 3)
        .map_err(|_| AppError::config("Synthetic panel is too long."))?;
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| AppError::config("Synthetic panel runs past the calendar range."))
}
