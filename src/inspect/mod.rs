//! Distribution / normality inspector.
//!
//! For each selected numeric column: drop missing values, build a histogram
//! with a KDE overlay, hand it to every sink, and optionally run Shapiro-Wilk.
//! Columns with no values left are skipped.

use crate::domain::NormalityResult;
use crate::error::AppError;
use crate::io::Table;
use crate::plot::DistributionSink;
use crate::stats::{distribution, shapiro_wilk};

/// Histogram bin count used when the caller does not override it.
pub const DEFAULT_BINS: usize = 30;

/// Number of points the KDE curve is evaluated on.
const KDE_GRID: usize = 200;

/// Resolve the columns to inspect: the caller's list, or every numeric column.
pub fn select_columns(table: &Table, columns: Option<&[String]>) -> Result<Vec<String>, AppError> {
    let Some(requested) = columns else {
        return Ok(table.numeric_column_names());
    };

    for name in requested {
        let column = table
            .column(name)
            .ok_or_else(|| AppError::input(format!("Unknown column '{name}'.")))?;
        if !column.is_numeric() {
            return Err(AppError::input(format!("Column '{name}' is not numeric.")));
        }
    }
    Ok(requested.to_vec())
}

/// Run the inspector.
///
/// Returns the Shapiro-Wilk table sorted by descending p-value when `shapiro`
/// is set, otherwise `None`.
pub fn inspect_distributions(
    table: &Table,
    columns: Option<&[String]>,
    shapiro: bool,
    bins: usize,
    sinks: &mut [&mut dyn DistributionSink],
) -> Result<Option<Vec<NormalityResult>>, AppError> {
    let selected = select_columns(table, columns)?;
    log::info!("inspecting {} column(s)", selected.len());

    let mut results = Vec::new();
    for name in &selected {
        let values: Vec<f64> = table
            .column(name)
            .and_then(|c| c.numeric_values())
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        if values.is_empty() {
            log::warn!("column '{name}' has no non-missing values; skipping");
            continue;
        }

        let dist = distribution(name, &values, bins, KDE_GRID)?;
        for sink in sinks.iter_mut() {
            sink.render(&dist)?;
        }

        if shapiro {
            let sw = shapiro_wilk(&values).map_err(|e| AppError::new(e.exit_code(), format!("{name}: {e}")))?;
            log::debug!("{name}: W={:.5} p={:.5e}", sw.w, sw.p_value);
            results.push(NormalityResult {
                feature: name.clone(),
                w_statistic: sw.w,
                p_value: sw.p_value,
            });
        }
    }

    if !shapiro {
        return Ok(None);
    }
    results.sort_by(|a, b| b.p_value.total_cmp(&a.p_value));
    Ok(Some(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Column;
    use crate::plot::CollectSink;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> Table {
        Table::new(vec![
            Column::new("label", cells(&["a", "b", "c", "d", "e", "f"])),
            Column::new("skewed", cells(&["1", "1", "1", "1", "2", "40"])),
            Column::new("even", cells(&["1", "2", "3", "4", "5", "6"])),
            Column::new("empty", cells(&["", "NA", "", "", "NaN", ""])),
        ])
    }

    #[test]
    fn all_missing_column_is_skipped_without_error() {
        let t = table();
        let mut sink = CollectSink::default();
        let cols = vec!["empty".to_string(), "even".to_string()];
        let results = inspect_distributions(&t, Some(&cols), true, DEFAULT_BINS, &mut [&mut sink])
            .unwrap()
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].feature, "even");
        assert_eq!(sink.distributions.len(), 1);
    }

    #[test]
    fn default_selection_uses_numeric_columns_and_sorts_by_p() {
        let t = table();
        let mut sink = CollectSink::default();
        let results = inspect_distributions(&t, None, true, 10, &mut [&mut sink]).unwrap().unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(names, vec!["even", "skewed"]);
        assert!(results[0].p_value >= results[1].p_value);
        assert!(results.iter().all(|r| r.w_statistic > 0.0 && r.w_statistic <= 1.0));
        assert_eq!(sink.distributions.len(), 2);
    }

    #[test]
    fn without_shapiro_nothing_is_returned_but_charts_render() {
        let t = table();
        let mut sink = CollectSink::default();
        let out = inspect_distributions(&t, None, false, 10, &mut [&mut sink]).unwrap();
        assert!(out.is_none());
        assert_eq!(sink.distributions.len(), 2);
    }

    #[test]
    fn unknown_or_text_columns_are_rejected() {
        let t = table();
        let missing = vec!["nope".to_string()];
        assert!(select_columns(&t, Some(&missing)).is_err());
        let text = vec!["label".to_string()];
        assert!(select_columns(&t, Some(&text)).is_err());
    }

    #[test]
    fn generated_panel_columns_are_inspectable() {
        use crate::data::generate_panel_seeded;
        use crate::domain::GeneratorConfig;
        use crate::io::{read_table_csv, write_panel_csv};

        let frame = generate_panel_seeded(&GeneratorConfig::default(), 42).unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("panel.csv");
        write_panel_csv(&path, &frame).unwrap();
        let t = read_table_csv(&path).unwrap();

        let mut sink = CollectSink::default();
        let results = inspect_distributions(&t, None, true, DEFAULT_BINS, &mut [&mut sink])
            .unwrap()
            .unwrap();
        // Everything but region and week.
        assert_eq!(results.len(), 10);
        assert!(sink.distributions.iter().all(|d| d.n == 2508));

        // Holiday is binary and far from normal.
        let holiday = results.iter().find(|r| r.feature == "holiday").unwrap();
        assert!(holiday.p_value < 1e-6);
    }
}
