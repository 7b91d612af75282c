//! Per-indicator series and Phillips-curve design matrices.
//!
//! The regression engine relies on two primitive operations:
//! - group the z-score table into one ordered series per tightness indicator
//! - build the design matrix of a model variant for that series, with the
//!   regressors lagged and incomplete rows dropped
//!
//! These are implemented here for each model variant.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};

use crate::domain::{Indicator, InflationTarget, ModelVariant, ZScoreRow};
use crate::math::lag;

/// One tightness indicator alongside both inflation targets, in date order.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator: Indicator,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
    pub core_cpi: Vec<Option<f64>>,
    pub core_pce: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn target(&self, target: InflationTarget) -> &[Option<f64>] {
        match target {
            InflationTarget::CoreCpi => &self.core_cpi,
            InflationTarget::CorePce => &self.core_pce,
        }
    }
}

/// Group z-score rows dated on or before `estimation_end` by tightness indicator.
///
/// Each group keeps the input row order, so positional lags are lags in time.
pub fn group_by_indicator(rows: &[ZScoreRow], estimation_end: NaiveDate) -> Vec<IndicatorSeries> {
    let window: Vec<&ZScoreRow> = rows.iter().filter(|r| r.date <= estimation_end).collect();
    let dates: Vec<NaiveDate> = window.iter().map(|r| r.date).collect();
    let core_cpi: Vec<Option<f64>> = window.iter().map(|r| r.core_cpi).collect();
    let core_pce: Vec<Option<f64>> = window.iter().map(|r| r.core_pce).collect();

    Indicator::TIGHTNESS
        .iter()
        .map(|&indicator| IndicatorSeries {
            indicator,
            dates: dates.clone(),
            values: window.iter().map(|r| r.get(indicator)).collect(),
            core_cpi: core_cpi.clone(),
            core_pce: core_pce.clone(),
        })
        .collect()
}

/// Fill a design row for the given variant.
///
/// The row includes the constant term first (intercept), then the lagged
/// indicator, then (autoregressive variants only) the lagged target.
///
/// # Panics
/// Panics if `out` does not have length `variant.n_regressors() + 1`.
pub fn fill_design_row(variant: ModelVariant, x_lag: f64, y_lag: f64, out: &mut [f64]) {
    out[0] = 1.0;
    out[1] = x_lag;
    if variant.autoregressive() {
        out[2] = y_lag;
    }
}

/// Design matrix and target vector for one variant, after listwise deletion.
#[derive(Debug, Clone)]
pub struct Design {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    /// Dates of the rows that entered the fit.
    pub dates: Vec<NaiveDate>,
    /// Rows dropped because a lagged regressor or the target was undefined.
    pub dropped: usize,
}

/// Build the lagged design for `variant` over `series`.
pub fn build_design(series: &IndicatorSeries, variant: ModelVariant, lag_periods: usize) -> Design {
    let target = series.target(variant.target());
    let x_lag = lag(&series.values, lag_periods);
    let y_lag = lag(target, lag_periods);
    let width = variant.n_regressors() + 1;

    let mut data = Vec::with_capacity(series.len() * width);
    let mut y = Vec::with_capacity(series.len());
    let mut dates = Vec::with_capacity(series.len());
    let mut row = vec![0.0; width];

    for i in 0..series.len() {
        let Some(yi) = target[i] else { continue };
        let Some(xi) = x_lag[i] else { continue };
        let yl = if variant.autoregressive() {
            match y_lag[i] {
                Some(v) => v,
                None => continue,
            }
        } else {
            0.0
        };
        fill_design_row(variant, xi, yl, &mut row);
        data.extend_from_slice(&row);
        y.push(yi);
        dates.push(series.dates[i]);
    }

    let n = y.len();
    Design {
        x: DMatrix::from_row_slice(n, width, &data),
        y: DVector::from_vec(y),
        dates,
        dropped: series.len() - n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> IndicatorSeries {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        IndicatorSeries {
            indicator: Indicator::Ur,
            dates: (0..n)
                .map(|i| start + chrono::Months::new(3 * i as u32))
                .collect(),
            values: (0..n).map(|i| Some(i as f64)).collect(),
            core_cpi: (0..n).map(|i| Some(10.0 + i as f64)).collect(),
            core_pce: (0..n).map(|i| Some(20.0 + i as f64)).collect(),
        }
    }

    #[test]
    fn plain_design_uses_lagged_indicator() {
        let d = build_design(&series(10), ModelVariant::CpiPlain, 4);
        assert_eq!(d.x.nrows(), 6);
        assert_eq!(d.x.ncols(), 2);
        assert_eq!(d.dropped, 4);
        // First usable row is t=4: target 14, regressor value at t=0.
        assert_eq!(d.y[0], 14.0);
        assert_eq!(d.x[(0, 0)], 1.0);
        assert_eq!(d.x[(0, 1)], 0.0);
        assert_eq!(d.x[(5, 1)], 5.0);
    }

    #[test]
    fn autoregressive_design_adds_lagged_target() {
        let d = build_design(&series(10), ModelVariant::PceAr, 4);
        assert_eq!(d.x.ncols(), 3);
        assert_eq!(d.y[0], 24.0);
        assert_eq!(d.x[(0, 2)], 20.0);
    }

    #[test]
    fn gaps_are_dropped_listwise() {
        let mut s = series(10);
        s.core_cpi[6] = None; // target gap at t=6, lagged-target gap at t=10 (out of range)
        s.values[1] = None; // lagged-indicator gap at t=5
        let d = build_design(&s, ModelVariant::CpiAr, 4);
        assert_eq!(d.y.len(), 4);
        assert_eq!(d.dropped, 6);
        assert!(!d.dates.contains(&s.dates[5]));
        assert!(!d.dates.contains(&s.dates[6]));
    }

    #[test]
    fn grouping_respects_estimation_end() {
        let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap();
        let rows: Vec<ZScoreRow> = (0..4)
            .map(|i| ZScoreRow {
                date: start + chrono::Months::new(3 * i),
                ur: Some(i as f64),
                panr: Some(1.0),
                upjo: None,
                qr: Some(2.0),
                core_cpi: Some(0.5),
                core_pce: Some(0.4),
            })
            .collect();

        let groups = group_by_indicator(&rows, NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].indicator, Indicator::Ur);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].values, vec![Some(0.0), Some(1.0)]);
        assert_eq!(groups[2].values, vec![None, None]);
    }
}
