//! Write the panel and the normality results to disk.
//!
//! Files are meant to be easy to consume in spreadsheets or downstream scripts:
//! plain header row, no index column.

use std::fs::File;
use std::path::Path;

use crate::data::PanelFrame;
use crate::domain::NormalityResult;
use crate::error::AppError;

/// Write the panel as CSV with the fixed column header.
pub fn write_panel_csv(path: &Path, frame: &PanelFrame) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create panel CSV '{}': {e}", path.display())))?;

    for row in frame.rows() {
        writer
            .serialize(&row)
            .map_err(|e| AppError::input(format!("Failed to write panel CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush panel CSV '{}': {e}", path.display())))?;
    log::info!("wrote {} rows to {}", frame.len(), path.display());
    Ok(())
}

/// Export normality results; `.json` writes a JSON array, anything else CSV.
pub fn write_normality_results(path: &Path, results: &[NormalityResult]) -> Result<(), AppError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let file = File::create(path)
            .map_err(|e| AppError::input(format!("Failed to create results JSON '{}': {e}", path.display())))?;
        serde_json::to_writer_pretty(file, results)
            .map_err(|e| AppError::input(format!("Failed to write results JSON: {e}")))?;
    } else {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| AppError::input(format!("Failed to create results CSV '{}': {e}", path.display())))?;
        for r in results {
            writer
                .serialize(r)
                .map_err(|e| AppError::input(format!("Failed to write results CSV row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| AppError::input(format!("Failed to flush results CSV: {e}")))?;
    }

    log::info!("exported {} normality results to {}", results.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_panel_seeded;
    use crate::domain::{GeneratorConfig, PANEL_COLUMNS};
    use tempfile::TempDir;

    #[test]
    fn panel_csv_has_exact_header_and_one_line_per_row() {
        let frame = generate_panel_seeded(&GeneratorConfig::default(), 42).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.csv");
        write_panel_csv(&path, &frame).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), PANEL_COLUMNS.join(","));
        assert_eq!(lines.count(), frame.len());
        assert!(text.lines().nth(1).unwrap().starts_with("Great Lakes,2021-01-04,"));
    }

    #[test]
    fn same_seed_writes_byte_identical_files() {
        let config = GeneratorConfig::default();
        let dir = TempDir::new().unwrap();
        let a_path = dir.path().join("det_a.csv");
        let b_path = dir.path().join("det_b.csv");
        write_panel_csv(&a_path, &generate_panel_seeded(&config, 123).unwrap()).unwrap();
        write_panel_csv(&b_path, &generate_panel_seeded(&config, 123).unwrap()).unwrap();

        let a = std::fs::read(&a_path).unwrap();
        let b = std::fs::read(&b_path).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn normality_results_export_csv_and_json() {
        let results = vec![NormalityResult {
            feature: "roi".to_string(),
            w_statistic: 0.98,
            p_value: 0.25,
        }];

        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("results.csv");
        write_normality_results(&csv_path, &results).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text.lines().next().unwrap(), "Feature,W-Statistic,p-value");
        assert_eq!(text.lines().nth(1).unwrap(), "roi,0.98,0.25");

        let json_path = dir.path().join("results.json");
        write_normality_results(&json_path, &results).unwrap();
        let parsed: Vec<NormalityResult> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, results);

    }
}
