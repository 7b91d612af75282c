//! Long → wide reshaping of provider observations.
//!
//! One output row per distinct date (ascending), one column per distinct
//! series id. Absent `(series, date)` combinations stay absent; nothing is
//! interpolated or carried forward.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{RawObservation, WideRow, WideTable};

/// Pivot observations into a date-keyed wide table.
///
/// If the same `(series, date)` pair appears more than once, the later
/// observation wins.
pub fn assemble_wide(observations: &[RawObservation]) -> WideTable {
    let mut columns = BTreeSet::new();
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();

    for obs in observations {
        columns.insert(obs.series_id.clone());
        let row = by_date.entry(obs.date).or_default();
        if row.insert(obs.series_id.clone(), obs.value).is_some() {
            log::warn!(
                "duplicate observation for {} on {}; keeping the later value",
                obs.series_id,
                obs.date
            );
        }
    }

    let rows = by_date
        .into_iter()
        .map(|(date, values)| WideRow { date, values })
        .collect();

    WideTable {
        columns: columns.into_iter().collect(),
        rows,
    }
}
