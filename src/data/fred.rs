//! FRED API integration: full-history observations for a list of series.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{RawObservation, SeriesSpec};
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Build a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::config("FRED API key is empty."));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Build a client from `FRED_API_KEY` (environment or `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::config("Missing FRED_API_KEY in environment (.env)."))?;
        Self::new(api_key)
    }

    /// Fetch every series in `specs` and concatenate the observations.
    ///
    /// Any failure aborts the whole fetch; there is no retry.
    pub fn fetch_all(&self, specs: &[SeriesSpec]) -> Result<Vec<RawObservation>, AppError> {
        let mut out = Vec::new();
        for spec in specs {
            let obs = self.fetch_series(spec)?;
            if obs.is_empty() {
                return Err(AppError::io(format!(
                    "No observations returned for series {}.",
                    spec.id
                )));
            }
            log::info!(
                "fetched {} ({}, {}): {} observations",
                spec.id,
                spec.frequency.fred_code(),
                spec.units.fred_code(),
                obs.len()
            );
            out.extend(obs);
        }
        Ok(out)
    }

    /// Fetch one series at the requested frequency and unit transform.
    pub fn fetch_series(&self, spec: &SeriesSpec) -> Result<Vec<RawObservation>, AppError> {
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", spec.id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("frequency", spec.frequency.fred_code()),
                ("units", spec.units.fred_code()),
                ("sort_order", "asc"),
            ])
            .send()
            .map_err(|e| AppError::io(format!("FRED request for {} failed: {e}", spec.id)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp
                .json::<ErrorResponse>()
                .ok()
                .and_then(|e| e.error_message)
                .unwrap_or_default();
            return Err(AppError::io(format!(
                "FRED request for {} failed with status {status}. {detail}",
                spec.id
            )));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::io(format!("Failed to parse FRED response for {}: {e}", spec.id)))?;

        parse_observations(&spec.id, body)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: Option<String>,
}

fn parse_observations(
    series_id: &str,
    body: ObservationsResponse,
) -> Result<Vec<RawObservation>, AppError> {
    let mut out = Vec::with_capacity(body.observations.len());
    for obs in body.observations {
        // FRED marks missing observations with ".".
        let value = match parse_value(&obs.value) {
            Some(v) => v,
            None => continue,
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| AppError::io(format!("Invalid FRED date '{}': {e}", obs.date)))?;
        out.push(RawObservation {
            series_id: series_id.to_string(),
            date,
            value,
        });
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
