//! Formatted terminal output: panel preview, normality table, recovery table.
//!
//! We keep formatting code in one place so the generator and the statistics
//! stay free of presentation concerns and output changes stay localized.

use crate::data::PanelFrame;
use crate::domain::{NormalityResult, PANEL_COLUMNS};
use crate::fit::Recovery;

/// Header printed above the Shapiro-Wilk table.
pub const NORMALITY_HEADER: &str = "--- Shapiro-Wilk Test Results ---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// `Shape: (rows, columns)`
pub fn format_shape(frame: &PanelFrame) -> String {
    let (rows, cols) = frame.shape();
    format!("Shape: ({rows}, {cols})")
}

/// First `n` rows of the panel as an aligned table.
pub fn format_panel_preview(frame: &PanelFrame, n: usize) -> String {
    let rows: Vec<Vec<String>> = frame
        .rows()
        .take(n)
        .map(|r| {
            vec![
                r.region.to_string(),
                r.week.to_string(),
                format!("{:.2}", r.ad_spend_tv),
                format!("{:.2}", r.ad_spend_digital),
                format!("{:.2}", r.ad_spend_outdoor),
                format!("{:.2}", r.ad_spend_retail),
                format!("{:.2}", r.avg_temp),
                r.holiday.to_string(),
                format!("{:.2}", r.pepsi_spend),
                format!("{:.2}", r.sales_volume),
                format!("{:.2}", r.total_spend),
                format!("{:.4}", r.roi),
            ]
        })
        .collect();

    let mut align = vec![Align::Right; PANEL_COLUMNS.len()];
    align[0] = Align::Left;
    align[1] = Align::Left;
    format_columns(&PANEL_COLUMNS, &rows, &align)
}

/// The normality table, most-normal column first (callers pass it sorted).
pub fn format_normality_table(results: &[NormalityResult]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.feature.clone(),
                format!("{:.6}", r.w_statistic),
                format!("{:.6e}", r.p_value),
            ]
        })
        .collect();

    let mut out = String::new();
    out.push_str(NORMALITY_HEADER);
    out.push('\n');
    if results.is_empty() {
        out.push_str("(no columns tested)\n");
        return out;
    }
    out.push_str(&format_columns(
        &["Feature", "W-Statistic", "p-value"],
        &rows,
        &[Align::Left, Align::Right, Align::Right],
    ));
    out
}

/// Recovered vs simulated coefficients plus the region effects.
pub fn format_recovery(recovery: &Recovery) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Response regression: n={} | R^2={:.4} | residual sd={:.2}\n",
        recovery.n, recovery.r_squared, recovery.residual_sd
    ));
    if recovery.floored > 0 {
        out.push_str(&format!("({} rows on the sales floor)\n", recovery.floored));
    }
    out.push('\n');

    let rows: Vec<Vec<String>> = recovery
        .coefficients
        .iter()
        .map(|c| {
            vec![
                c.name.to_string(),
                fmt_coef(c.truth),
                fmt_coef(c.estimate),
                fmt_coef(c.error()),
            ]
        })
        .collect();
    out.push_str(&format_columns(
        &["term", "true", "estimate", "error"],
        &rows,
        &[Align::Left, Align::Right, Align::Right, Align::Right],
    ));

    out.push_str("\nRegion effects:\n");
    let rows: Vec<Vec<String>> = recovery
        .region_effects
        .iter()
        .map(|(region, e)| vec![region.to_string(), format!("{e:.2}")])
        .collect();
    out.push_str(&format_columns(&["region", "effect"], &rows, &[Align::Left, Align::Right]));
    out
}

fn fmt_coef(v: f64) -> String {
    if v != 0.0 && v.abs() < 0.1 {
        format!("{v:.5}")
    } else {
        format!("{v:.3}")
    }
}

/// Header, dashed rule, rows; every column padded to its widest cell.
fn format_columns(headers: &[&str], rows: &[Vec<String>], align: &[Align]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths, align);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(&mut out, &rule, &widths, align);
    for row in rows {
        push_line(&mut out, row, &widths, align);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], align: &[Align]) {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(align)
        .map(|((cell, &w), a)| match a {
            Align::Left => format!("{cell:<w$}"),
            Align::Right => format!("{cell:>w$}"),
        })
        .collect();
    out.push_str(parts.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_panel_seeded;
    use crate::domain::GeneratorConfig;

    #[test]
    fn preview_has_header_rule_and_n_rows() {
        let frame = generate_panel_seeded(&GeneratorConfig::default(), 42).unwrap();
        let txt = format_panel_preview(&frame, 5);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("region"));
        assert!(lines[0].ends_with("roi"));
        assert!(lines[1].starts_with("-----------"));
        assert!(lines[2].starts_with("Great Lakes  2021-01-04"));
        assert_eq!(format_shape(&frame), "Shape: (2508, 12)");
    }

    #[test]
    fn normality_table_keeps_caller_order() {
        let results = vec![
            NormalityResult {
                feature: "avg_temp".to_string(),
                w_statistic: 0.999,
                p_value: 0.5,
            },
            NormalityResult {
                feature: "holiday".to_string(),
                w_statistic: 0.35,
                p_value: 1e-60,
            },
        ];
        let txt = format_normality_table(&results);
        let expected = concat!(
            "--- Shapiro-Wilk Test Results ---\n",
            "Feature   W-Statistic       p-value\n",
            "--------  -----------  ------------\n",
            "avg_temp     0.999000   5.000000e-1\n",
            "holiday      0.350000  1.000000e-60\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_normality_table_says_so() {
        let txt = format_normality_table(&[]);
        assert_eq!(txt, "--- Shapiro-Wilk Test Results ---\n(no columns tested)\n");
    }
}
