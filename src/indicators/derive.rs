//! Indicator formulas and the analysis window filter.
//!
//! - ur       = UNRATE
//! - panr     = 100 − LNS12300060
//! - upjo     = UNEMPLOY / JTSJOL
//! - qr       = 100 − 100 × JTSQUL / PAYEMS
//! - core_cpi = CPILFESL (already a 4-period % change at fetch time)
//! - core_pce = PCEPILFE (already a 4-period % change at fetch time)
//!
//! A formula with any absent input, or a zero denominator, yields an
//! undefined cell.

use chrono::NaiveDate;

use crate::domain::{
    IndicatorRow, WideRow, WideTable, SERIES_CORE_CPI, SERIES_CORE_PCE, SERIES_JOB_OPENINGS,
    SERIES_PAYROLLS, SERIES_PRIME_AGE_EPOP, SERIES_QUITS, SERIES_UNEMPLOYED, SERIES_UNRATE,
};

/// Compute the six indicators for one wide row.
pub fn derive_row(row: &WideRow) -> IndicatorRow {
    let ur = row.get(SERIES_UNRATE);
    let panr = row.get(SERIES_PRIME_AGE_EPOP).map(|epop| 100.0 - epop);
    let upjo = ratio(row.get(SERIES_UNEMPLOYED), row.get(SERIES_JOB_OPENINGS));
    let qr = ratio(row.get(SERIES_QUITS), row.get(SERIES_PAYROLLS)).map(|q| 100.0 - 100.0 * q);

    IndicatorRow {
        date: row.date,
        ur,
        panr,
        upjo,
        qr,
        core_cpi: row.get(SERIES_CORE_CPI),
        core_pce: row.get(SERIES_CORE_PCE),
    }
}

/// Derive indicators for every wide row, keeping dates in `[start, end]`.
///
/// Row order (ascending date) is preserved.
pub fn derive_indicators(wide: &WideTable, start: NaiveDate, end: NaiveDate) -> Vec<IndicatorRow> {
    wide.rows
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .map(derive_row)
        .collect()
}

fn ratio(numer: Option<f64>, denom: Option<f64>) -> Option<f64> {
    let (n, d) = (numer?, denom?);
    if d == 0.0 {
        return None;
    }
    let v = n / d;
    v.is_finite().then_some(v)
}
