//! Plotters-rendered SVG charts, one file per inspected column.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::AppError;
use crate::stats::ColumnDistribution;

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

/// File name used for a column's chart inside the output directory.
pub fn svg_file_name(column: &str) -> String {
    let stem: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("dist_{stem}.svg")
}

/// Draw the histogram (filled bars with black edges) and the KDE line to `path`.
pub fn write_distribution_svg(path: &Path, dist: &ColumnDistribution, size: (u32, u32)) -> Result<(), AppError> {
    let draw_err = |e: &dyn std::fmt::Display| AppError::compute(format!("Failed to draw '{}': {e}", path.display()));

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;

    let (x0, x1) = dist.x_range();
    let y1 = (dist.y_max() * 1.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Distribution of '{}'", dist.name), ("sans-serif", 18))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, 0.0..y1)
        .map_err(|e| draw_err(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(dist.name.as_str())
        .y_desc("Frequency")
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(|e| draw_err(&e))?;

    chart
        .draw_series(
            dist.histogram
                .bars()
                .map(|(lo, hi, c)| Rectangle::new([(lo, 0.0), (hi, c as f64)], STEEL_BLUE.mix(0.6).filled())),
        )
        .map_err(|e| draw_err(&e))?;
    chart
        .draw_series(
            dist.histogram
                .bars()
                .map(|(lo, hi, c)| Rectangle::new([(lo, 0.0), (hi, c as f64)], BLACK.stroke_width(1))),
        )
        .map_err(|e| draw_err(&e))?;

    if !dist.kde.is_empty() {
        chart
            .draw_series(LineSeries::new(dist.kde.iter().copied(), STEEL_BLUE.stroke_width(2)))
            .map_err(|e| draw_err(&e))?;
    }

    root.present().map_err(|e| draw_err(&e))?;
    Ok(())
}

/// Directory-backed writer used by the inspector's SVG sink.
#[derive(Debug, Clone)]
pub struct SvgWriter {
    pub dir: PathBuf,
    pub size: (u32, u32),
}

impl SvgWriter {
    pub fn new(dir: PathBuf) -> Result<Self, AppError> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::input(format!("Failed to create chart dir '{}': {e}", dir.display())))?;
        Ok(Self { dir, size: (640, 420) })
    }

    pub fn write(&self, dist: &ColumnDistribution) -> Result<PathBuf, AppError> {
        let path = self.dir.join(svg_file_name(&dist.name));
        write_distribution_svg(&path, dist, self.size)?;
        log::info!("wrote chart {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distribution;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(svg_file_name("ad_spend_tv"), "dist_ad_spend_tv.svg");
        assert_eq!(svg_file_name("p value/%"), "dist_p_value__.svg");
    }

    #[test]
    fn writes_an_svg_document() {
        let tmp = tempfile::TempDir::new().unwrap();
        // Nested so the writer has to create the directory itself.
        let dir = tmp.path().join("charts");
        let writer = SvgWriter::new(dir.clone()).unwrap();
        let values: Vec<f64> = (0..50).map(|i| (i as f64).sqrt()).collect();
        let dist = distribution("sqrt", &values, 8, 40).unwrap();

        let path = writer.write(&dist).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("<rect"));
        assert_eq!(path, dir.join("dist_sqrt.svg"));
    }
}
