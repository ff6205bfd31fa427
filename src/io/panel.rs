//! Read a previously written panel CSV back into memory.

use std::path::Path;

use crate::data::PanelFrame;
use crate::domain::PanelRow;
use crate::error::AppError;

pub fn read_panel_csv(path: &Path) -> Result<PanelFrame, AppError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to open panel CSV '{}': {e}", path.display())))?;

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<PanelRow>().enumerate() {
        let row = result.map_err(|e| AppError::input(format!("Invalid panel row on line {}: {e}", idx + 2)))?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(AppError::input(format!("Panel CSV '{}' has no rows.", path.display())));
    }
    Ok(PanelFrame::from_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_panel_seeded;
    use crate::domain::GeneratorConfig;
    use crate::io::write_panel_csv;
    use tempfile::TempDir;

    #[test]
    fn written_panel_reads_back_with_exact_ratios() {
        let frame = generate_panel_seeded(&GeneratorConfig::default(), 9).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("panel.csv");
        write_panel_csv(&path, &frame).unwrap();

        let back = read_panel_csv(&path).unwrap();
        assert_eq!(back, frame);
        for row in back.rows() {
            assert_eq!(row.roi, row.sales_volume / row.total_spend);
        }
    }
}
