//! Plotters-powered histogram + KDE widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. Filled rectangles look blocky at terminal
//! resolution, so bars are drawn as a step outline instead.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::stats::ColumnDistribution;

/// A render-only chart description; all series are prepared by the caller.
pub struct DistributionChart<'a> {
    /// Step outline of the histogram bars.
    pub outline: &'a [(f64, f64)],
    /// Count-scaled density curve.
    pub kde: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// Step outline tracing every bar: up the left edge, across, down the right.
pub fn histogram_outline(dist: &ColumnDistribution) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(dist.histogram.counts.len() * 4);
    for (lo, hi, count) in dist.histogram.bars() {
        let c = count as f64;
        out.extend([(lo, 0.0), (lo, c), (hi, c), (hi, 0.0)]);
    }
    out
}

/// Axis bounds with a little headroom above the tallest element.
pub fn chart_bounds(dist: &ColumnDistribution) -> ([f64; 2], [f64; 2]) {
    let (x0, x1) = dist.x_range();
    let y1 = dist.y_max().max(1.0) * 1.05;
    ([x0, x1], [0.0, y1])
}

impl<'a> Widget for DistributionChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            let bar_color = RGBColor(70, 130, 180);
            let kde_color = RGBColor(255, 215, 0);

            chart.draw_series(LineSeries::new(self.outline.iter().copied(), &bar_color))?;
            chart.draw_series(LineSeries::new(self.kde.iter().copied(), &kde_color))?;
            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Histogram;

    fn dist() -> ColumnDistribution {
        ColumnDistribution {
            name: "x".to_string(),
            n: 3,
            histogram: Histogram {
                edges: vec![0.0, 1.0, 2.0],
                counts: vec![1, 2],
            },
            kde: vec![(0.0, 0.5), (1.0, 2.5), (2.0, 0.5)],
        }
    }

    #[test]
    fn outline_traces_each_bar() {
        let outline = histogram_outline(&dist());
        assert_eq!(
            outline,
            vec![
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (1.0, 0.0),
                (1.0, 2.0),
                (2.0, 2.0),
                (2.0, 0.0),
            ]
        );
    }

    #[test]
    fn bounds_cover_kde_peak() {
        let (x, y) = chart_bounds(&dist());
        assert_eq!(x, [0.0, 2.0]);
        assert_eq!(y[0], 0.0);
        assert!((y[1] - 2.5 * 1.05).abs() < 1e-12);
    }
}
