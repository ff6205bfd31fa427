//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, optimized for:
//! - quick visual checks of a column's shape in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - histogram bars: `#`
//! - count-scaled KDE overlay: `-` line

use crate::stats::ColumnDistribution;

/// Render a histogram with its KDE overlay.
pub fn render_ascii_distribution(dist: &ColumnDistribution, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(3);

    let (x_min, x_max) = dist.x_range();
    let y_max = dist.y_max().max(1.0);

    let mut grid = vec![vec![' '; width]; height];

    // Bars first so the density line overlays them.
    draw_bars(&mut grid, &dist.histogram.counts, y_max);
    draw_curve(&mut grid, &dist.kde, x_min, x_max, y_max);

    let mut out = String::new();
    out.push_str(&format!("Distribution of '{}' (n={})\n", dist.name, dist.n));
    out.push_str(&format!("x=[{x_min:.3}, {x_max:.3}] | frequency=[0, {y_max:.1}]\n"));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn draw_bars(grid: &mut [Vec<char>], counts: &[usize], y_max: f64) {
    if counts.is_empty() {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();
    let bins = counts.len();

    for x in 0..width {
        let u = (x as f64 + 0.5) / width as f64;
        let bin = ((u * bins as f64).floor() as usize).min(bins - 1);
        let filled = ((counts[bin] as f64 / y_max) * height as f64).round() as usize;
        for row in grid.iter_mut().skip(height - filled.min(height)) {
            row[x] = '#';
        }
    }
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = (y / y_max).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_max: f64) {
    if curve.len() < 2 || x_max <= x_min {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, '-'),
            None => grid[row][col] = '-',
        }
        prev = Some((col, row));
    }
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
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
