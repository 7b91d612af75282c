//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages as immutable tables
//! - exported to JSON/CSV
//! - built by hand in tests

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FitError};

pub const SERIES_UNRATE: &str = "UNRATE";
pub const SERIES_PRIME_AGE_EPOP: &str = "LNS12300060";
pub const SERIES_UNEMPLOYED: &str = "UNEMPLOY";
pub const SERIES_JOB_OPENINGS: &str = "JTSJOL";
pub const SERIES_QUITS: &str = "JTSQUL";
pub const SERIES_PAYROLLS: &str = "PAYEMS";
pub const SERIES_CORE_CPI: &str = "CPILFESL";
pub const SERIES_CORE_PCE: &str = "PCEPILFE";

/// Observation frequency requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// FRED `frequency` query code.
    pub fn fred_code(self) -> &'static str {
        match self {
            Frequency::Monthly => "m",
            Frequency::Quarterly => "q",
            Frequency::Annual => "a",
        }
    }
}

/// Unit transform applied by the provider before values are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Linear level (no transform).
    Level,
    /// Percent change from a year ago (4 periods at quarterly frequency).
    PercentChangeYearAgo,
}

impl Units {
    /// FRED `units` query code.
    pub fn fred_code(self) -> &'static str {
        match self {
            Units::Level => "lin",
            Units::PercentChangeYearAgo => "pc1",
        }
    }
}

/// One series to retrieve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub id: String,
    pub frequency: Frequency,
    pub units: Units,
}

impl SeriesSpec {
    pub fn new(id: impl Into<String>, frequency: Frequency, units: Units) -> Self {
        Self {
            id: id.into(),
            frequency,
            units,
        }
    }
}

/// The eight quarterly series the indicators are derived from.
pub fn default_series() -> Vec<SeriesSpec> {
    let q = Frequency::Quarterly;
    vec![
        SeriesSpec::new(SERIES_UNRATE, q, Units::Level),
        SeriesSpec::new(SERIES_PRIME_AGE_EPOP, q, Units::Level),
        SeriesSpec::new(SERIES_UNEMPLOYED, q, Units::Level),
        SeriesSpec::new(SERIES_JOB_OPENINGS, q, Units::Level),
        SeriesSpec::new(SERIES_QUITS, q, Units::Level),
        SeriesSpec::new(SERIES_PAYROLLS, q, Units::Level),
        SeriesSpec::new(SERIES_CORE_CPI, q, Units::PercentChangeYearAgo),
        SeriesSpec::new(SERIES_CORE_PCE, q, Units::PercentChangeYearAgo),
    ]
}

/// One `(series, date, value)` row as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub series_id: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// One date of the wide table. A series with no observation on this date has
/// no entry in `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub date: NaiveDate,
    pub values: BTreeMap<String, f64>,
}

impl WideRow {
    pub fn get(&self, series_id: &str) -> Option<f64> {
        self.values.get(series_id).copied()
    }
}

/// Wide table: date-ordered rows plus the set of columns seen in the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    pub columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// The six named indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Ur,
    Panr,
    Upjo,
    Qr,
    CoreCpi,
    CorePce,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Ur,
        Indicator::Panr,
        Indicator::Upjo,
        Indicator::Qr,
        Indicator::CoreCpi,
        Indicator::CorePce,
    ];

    /// Labor-market tightness indicators (the regressors).
    pub const TIGHTNESS: [Indicator; 4] = [
        Indicator::Ur,
        Indicator::Panr,
        Indicator::Upjo,
        Indicator::Qr,
    ];

    /// Column name used in exports.
    pub fn name(self) -> &'static str {
        match self {
            Indicator::Ur => "ur",
            Indicator::Panr => "panr",
            Indicator::Upjo => "upjo",
            Indicator::Qr => "qr",
            Indicator::CoreCpi => "core_cpi",
            Indicator::CorePce => "core_pce",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Indicator::Ur => "Unemployment rate",
            Indicator::Panr => "Prime-age non-employment",
            Indicator::Upjo => "Unemployed per opening",
            Indicator::Qr => "Non-quits rate",
            Indicator::CoreCpi => "Core CPI inflation",
            Indicator::CorePce => "Core PCE inflation",
        }
    }
}

/// Derived indicators for one date. `None` marks an undefined cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub ur: Option<f64>,
    pub panr: Option<f64>,
    pub upjo: Option<f64>,
    pub qr: Option<f64>,
    pub core_cpi: Option<f64>,
    pub core_pce: Option<f64>,
}

/// Same shape as [`IndicatorRow`], every value replaced by its baseline z-score.
pub type ZScoreRow = IndicatorRow;

impl IndicatorRow {
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::Ur => self.ur,
            Indicator::Panr => self.panr,
            Indicator::Upjo => self.upjo,
            Indicator::Qr => self.qr,
            Indicator::CoreCpi => self.core_cpi,
            Indicator::CorePce => self.core_pce,
        }
    }

    /// Build a new row by applying `f` to every defined value.
    pub fn map_values(&self, mut f: impl FnMut(Indicator, f64) -> f64) -> IndicatorRow {
        let mut apply = |ind: Indicator| self.get(ind).map(|v| f(ind, v));
        IndicatorRow {
            date: self.date,
            ur: apply(Indicator::Ur),
            panr: apply(Indicator::Panr),
            upjo: apply(Indicator::Upjo),
            qr: apply(Indicator::Qr),
            core_cpi: apply(Indicator::CoreCpi),
            core_pce: apply(Indicator::CorePce),
        }
    }
}

/// Baseline mean / sample standard deviation of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStats {
    pub mean: f64,
    pub sd: f64,
    /// Number of defined values the statistics were computed from.
    pub n: usize,
}

/// Fixed standardization parameters fitted over the baseline window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineParams {
    pub baseline_end: NaiveDate,
    pub stats: BTreeMap<Indicator, IndicatorStats>,
}

impl BaselineParams {
    pub fn get(&self, indicator: Indicator) -> Option<&IndicatorStats> {
        self.stats.get(&indicator)
    }
}

/// Which inflation series a model explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationTarget {
    CoreCpi,
    CorePce,
}

impl InflationTarget {
    pub fn indicator(self) -> Indicator {
        match self {
            InflationTarget::CoreCpi => Indicator::CoreCpi,
            InflationTarget::CorePce => Indicator::CorePce,
        }
    }
}

/// The four Phillips-curve specifications fitted per indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    CpiPlain,
    PcePlain,
    CpiAr,
    PceAr,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::CpiPlain,
        ModelVariant::PcePlain,
        ModelVariant::CpiAr,
        ModelVariant::PceAr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelVariant::CpiPlain => "cpi_plain",
            ModelVariant::PcePlain => "pce_plain",
            ModelVariant::CpiAr => "cpi_ar",
            ModelVariant::PceAr => "pce_ar",
        }
    }

    pub fn target(self) -> InflationTarget {
        match self {
            ModelVariant::CpiPlain | ModelVariant::CpiAr => InflationTarget::CoreCpi,
            ModelVariant::PcePlain | ModelVariant::PceAr => InflationTarget::CorePce,
        }
    }

    /// Whether the lagged target enters as a second regressor.
    pub fn autoregressive(self) -> bool {
        matches!(self, ModelVariant::CpiAr | ModelVariant::PceAr)
    }

    /// Number of regressors `p`, excluding the intercept.
    pub fn n_regressors(self) -> usize {
        if self.autoregressive() { 2 } else { 1 }
    }
}

/// Goodness-of-fit output of one regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitStats {
    pub n_obs: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Intercept first, then regressors in design order.
    pub coefficients: Vec<f64>,
}

/// One cell of the (indicator × variant) results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub indicator: Indicator,
    pub variant: ModelVariant,
    pub outcome: Result<FitStats, FitError>,
}

impl RegressionResult {
    pub fn adj_r_squared(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|s| s.adj_r_squared)
    }
}

/// Analysis windows and output options for one run.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First date kept by the indicator deriver (inclusive).
    pub start: NaiveDate,
    /// Last date kept by the indicator deriver (inclusive).
    pub end: NaiveDate,
    /// Last date of the standardization baseline (inclusive).
    pub baseline_end: NaiveDate,
    /// Last date used for regression estimation (inclusive).
    pub estimation_end: NaiveDate,
    /// Lag in periods applied to every regressor.
    pub lag: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_zscores: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start: ymd(2001, 1, 1),
            end: ymd(2021, 7, 31),
            baseline_end: ymd(2018, 12, 31),
            estimation_end: ymd(2019, 12, 31),
            lag: 4,
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export_zscores: None,
            export_results: None,
            export_json: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.start > self.end {
            return Err(AppError::config(format!(
                "Invalid analysis window: start {} is after end {}.",
                self.start, self.end
            )));
        }
        if self.baseline_end < self.start {
            return Err(AppError::config(format!(
                "Baseline end {} precedes the analysis start {}.",
                self.baseline_end, self.start
            )));
        }
        if self.lag == 0 {
            return Err(AppError::config("Lag must be at least one period."));
        }
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(config.lag, 4);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let config = RunConfig {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            ..RunConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
    }

    #[test]
    fn variant_regressor_counts() {
        assert_eq!(ModelVariant::CpiPlain.n_regressors(), 1);
        assert_eq!(ModelVariant::PceAr.n_regressors(), 2);
        assert_eq!(ModelVariant::PceAr.target(), InflationTarget::CorePce);
    }

    #[test]
    fn map_values_keeps_undefined_cells() {
        let row = IndicatorRow {
            date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            ur: Some(5.0),
            panr: None,
            upjo: Some(1.0),
            qr: Some(98.0),
            core_cpi: Some(2.0),
            core_pce: None,
        };
        let doubled = row.map_values(|_, v| v * 2.0);
        assert_eq!(doubled.ur, Some(10.0));
        assert_eq!(doubled.panr, None);
        assert_eq!(doubled.core_pce, None);
    }
}
