//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{BaselineParams, Indicator, ModelVariant, RegressionResult};
use crate::io::summary::RunWindows;

/// Format the run header: source, windows, and baseline parameters.
pub fn format_run_header(source: &str, windows: &RunWindows, baseline: &BaselineParams) -> String {
    let mut out = String::new();

    out.push_str("=== tight - Labor-market tightness Phillips curves ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Window: {} ..= {} | baseline <= {} | estimation <= {} | lag {}\n",
        windows.start, windows.end, windows.baseline_end, windows.estimation_end, windows.lag
    ));

    out.push_str("\nBaseline parameters:\n");
    out.push_str(&format!("{:<10} {:>12} {:>12} {:>6}\n", "indicator", "mean", "sd", "n"));
    out.push_str(&format!("{:-<10} {:-<12} {:-<12} {:-<6}\n", "", "", "", ""));
    for indicator in Indicator::ALL {
        if let Some(s) = baseline.get(indicator) {
            out.push_str(&format!(
                "{:<10} {:>12.4} {:>12.4} {:>6}\n",
                indicator.name(),
                s.mean,
                s.sd,
                s.n
            ));
        }
    }
    out.push('\n');

    out
}

/// Format the adjusted R² table (indicator rows × variant columns).
///
/// Models that could not be estimated show `n/a`; the reasons are listed
/// below the table.
pub fn format_results_table(results: &[RegressionResult]) -> String {
    let mut out = String::new();

    out.push_str("Adjusted R²:\n");
    let mut header = format!("{:<10}", "indicator");
    for v in ModelVariant::ALL {
        header.push_str(&format!(" {:>10}", v.name()));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    let mut rule = format!("{:-<10}", "");
    for _ in ModelVariant::ALL {
        rule.push_str(&format!(" {:-<10}", ""));
    }
    out.push_str(&rule);
    out.push('\n');

    for indicator in Indicator::TIGHTNESS {
        let mut line = format!("{:<10}", indicator.name());
        for variant in ModelVariant::ALL {
            let cell = results
                .iter()
                .find(|r| r.indicator == indicator && r.variant == variant)
                .and_then(|r| r.adj_r_squared())
                .map(|v| format!("{v:.3}"))
                .unwrap_or_else(|| "n/a".to_string());
            line.push_str(&format!(" {cell:>10}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let failures: Vec<&RegressionResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    if !failures.is_empty() {
        out.push_str("\nNot estimated:\n");
        for r in failures {
            if let Err(e) = &r.outcome {
                out.push_str(&format!("- {} / {}: {e}\n", r.indicator.name(), r.variant.name()));
            }
        }
    }

    out
}
