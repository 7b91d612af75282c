//! CSV exports: raw observations, z-score rows, and the regression table.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts. Undefined cells are written as empty fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{Indicator, RawObservation, RegressionResult, ZScoreRow};
use crate::error::AppError;

/// Write observations in the long format read back by `io::ingest`.
pub fn write_observations_csv(path: &Path, observations: &[RawObservation]) -> Result<(), AppError> {
    let mut file = create(path)?;
    write_observations(&mut file, observations)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

/// Write one row per date with the six z-scores.
pub fn write_zscores_csv(path: &Path, rows: &[ZScoreRow]) -> Result<(), AppError> {
    let mut file = create(path)?;
    write_zscores(&mut file, rows)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

/// Write one row per (indicator, variant).
pub fn write_results_csv(path: &Path, results: &[RegressionResult]) -> Result<(), AppError> {
    let mut file = create(path)?;
    write_results(&mut file, results)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn write_observations<W: Write>(out: &mut W, observations: &[RawObservation]) -> std::io::Result<()> {
    writeln!(out, "series_id,date,value")?;
    for o in observations {
        writeln!(out, "{},{},{}", o.series_id, o.date, o.value)?;
    }
    out.flush()
}

fn write_zscores<W: Write>(out: &mut W, rows: &[ZScoreRow]) -> std::io::Result<()> {
    let header: Vec<&str> = Indicator::ALL.iter().map(|i| i.name()).collect();
    writeln!(out, "date,{}", header.join(","))?;
    for r in rows {
        let cells: Vec<String> = Indicator::ALL
            .iter()
            .map(|&i| r.get(i).map(|v| format!("{v:.6}")).unwrap_or_default())
            .collect();
        writeln!(out, "{},{}", r.date, cells.join(","))?;
    }
    out.flush()
}

fn write_results<W: Write>(out: &mut W, results: &[RegressionResult]) -> std::io::Result<()> {
    writeln!(out, "indicator,variant,n_obs,r_squared,adj_r_squared,error")?;
    for r in results {
        match &r.outcome {
            Ok(s) => writeln!(
                out,
                "{},{},{},{:.6},{:.6},",
                r.indicator.name(),
                r.variant.name(),
                s.n_obs,
                s.r_squared,
                s.adj_r_squared
            )?,
            Err(e) => writeln!(
                out,
                "{},{},,,,\"{}\"",
                r.indicator.name(),
                r.variant.name(),
                e.to_string().replace('"', "'")
            )?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{FitStats, ModelVariant};
    use crate::error::FitError;

    #[test]
    fn zscore_rows_leave_undefined_cells_empty() {
        let rows = vec![ZScoreRow {
            date: NaiveDate::from_ymd_opt(2005, 4, 1).unwrap(),
            ur: Some(1.5),
            panr: None,
            upjo: Some(-0.25),
            qr: Some(0.0),
            core_cpi: Some(2.0),
            core_pce: None,
        }];
        let mut buf = Vec::new();
        write_zscores(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,ur,panr,upjo,qr,core_cpi,core_pce\n\
             2005-04-01,1.500000,,-0.250000,0.000000,2.000000,\n"
        );
    }

    #[test]
    fn results_include_failures() {
        let results = vec![
            RegressionResult {
                indicator: Indicator::Ur,
                variant: ModelVariant::CpiPlain,
                outcome: Ok(FitStats {
                    n_obs: 36,
                    r_squared: 0.5,
                    adj_r_squared: 0.485,
                    coefficients: vec![0.1, -0.4],
                }),
            },
            RegressionResult {
                indicator: Indicator::Ur,
                variant: ModelVariant::CpiAr,
                outcome: Err(FitError::InsufficientObservations { n: 2, required: 4 }),
            },
        ];
        let mut buf = Vec::new();
        write_results(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "ur,cpi_plain,36,0.500000,0.485000,");
        assert!(lines[2].starts_with("ur,cpi_ar,,,,\"insufficient observations"));
    }

    #[test]
    fn observations_round_trip_through_ingest() {
        let obs = vec![
            RawObservation {
                series_id: "UNRATE".to_string(),
                date: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
                value: 4.2333,
            },
            RawObservation {
                series_id: "CPILFESL".to_string(),
                date: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
                value: -0.125,
            },
        ];
        let mut path = std::env::temp_dir();
        path.push(format!("labor_tightness_obs_{}.csv", std::process::id()));
        write_observations_csv(&path, &obs).unwrap();
        let back = crate::io::load_observations_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.observations, obs);
    }
}
