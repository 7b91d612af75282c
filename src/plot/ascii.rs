//! ASCII plotting of z-score series for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - one glyph per indicator (see [`glyph`]), one column per date bucket
//! - the zero line (the baseline mean): `-`

use crate::domain::{Indicator, ZScoreRow};

/// Plot glyph for an indicator.
pub fn glyph(indicator: Indicator) -> char {
    match indicator {
        Indicator::Ur => 'u',
        Indicator::Panr => 'p',
        Indicator::Upjo => 'j',
        Indicator::Qr => 'q',
        Indicator::CoreCpi => 'c',
        Indicator::CorePce => 'e',
    }
}

/// Render the z-scores of `indicators` against time (row order).
pub fn render_zscore_plot(
    rows: &[ZScoreRow],
    indicators: &[Indicator],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (z_min, z_max) = z_range(rows, indicators).unwrap_or((-1.0, 1.0));
    let (z_min, z_max) = pad_range(z_min, z_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Zero line first so points overlay it.
    if z_min < 0.0 && z_max > 0.0 {
        let y0 = map_y(0.0, z_min, z_max, height);
        draw_line(&mut grid, 0, y0, width - 1, y0, '-');
    }

    let n = rows.len();
    for (i, row) in rows.iter().enumerate() {
        let x = map_x(i, n, width);
        for &indicator in indicators {
            if let Some(z) = row.get(indicator).filter(|z| z.is_finite()) {
                let y = map_y(z, z_min, z_max, height);
                grid[y][x] = glyph(indicator);
            }
        }
    }

    let mut out = String::new();
    match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Plot: dates=[{}, {}] | z=[{z_min:.2}, {z_max:.2}]\n",
            first.date, last.date
        )),
        _ => out.push_str(&format!("Plot: (no rows) | z=[{z_min:.2}, {z_max:.2}]\n")),
    }
    let legend: Vec<String> = indicators
        .iter()
        .map(|&i| format!("{}={}", glyph(i), i.name()))
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join(" ")));

    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn z_range(rows: &[ZScoreRow], indicators: &[Indicator]) -> Option<(f64, f64)> {
    let mut min_z = f64::INFINITY;
    let mut max_z = f64::NEG_INFINITY;
    for row in rows {
        for &indicator in indicators {
            if let Some(z) = row.get(indicator).filter(|z| z.is_finite()) {
                min_z = min_z.min(z);
                max_z = max_z.max(z);
            }
        }
    }
    if min_z.is_finite() && max_z.is_finite() && max_z > min_z {
        Some((min_z, max_z))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
