//! Drawing backend for [`UpliftChart`]
//!
//! Renders the chart model onto a caller-supplied plotters drawing area.
//! Series colors are fixed: treatment forest green, control orange, uplift
//! red.

use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::chart::{ChartKind, ChartSeries, UpliftChart};
use super::error::{ChartError, Result};

const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

const TREATMENT_LABEL: &str = "Treatment response";
const CONTROL_LABEL: &str = "Control response";
const UPLIFT_LABEL: &str = "Uplift";

fn to_render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

impl UpliftChart {
    /// Draw the chart onto `root`.
    ///
    /// The drawing area comes from the caller, so the figure never depends
    /// on ambient global state; presenting or persisting the backend stays
    /// the caller's responsibility.
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(to_render_err)?;

        let (x_range, y_range) = self.axis_ranges();
        let (x_min, x_max) = (x_range.start, x_range.end);

        let mut builder = ChartBuilder::on(root);
        builder.margin(20).x_label_area_size(60).y_label_area_size(60);
        if let Some(title) = self.title() {
            builder.caption(title, ("sans-serif", 22));
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(to_render_err)?;

        // Snap each drawn tick to the label of the closest percentile
        // boundary.
        let tick_labels = self.tick_labels();
        let ticks = self.percentiles().to_vec();
        let label_for = move |x: &f64| -> String {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (i, p) in ticks.iter().enumerate() {
                let dist = (p - *x).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best = i;
                }
            }
            tick_labels.get(best).cloned().unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_desc("Percentile")
            .y_desc("Response rate / Uplift")
            .light_line_style(BLACK.mix(0.15))
            .bold_line_style(BLACK.mix(0.3))
            .x_labels(self.percentiles().len())
            .x_label_formatter(&label_for)
            .draw()
            .map_err(to_render_err)?;

        let xs = self.percentiles();
        let series: [(&ChartSeries, RGBColor, &str); 3] = [
            (self.treatment_series(), FOREST_GREEN, TREATMENT_LABEL),
            (self.control_series(), ORANGE, CONTROL_LABEL),
            (self.uplift_series(), RED, UPLIFT_LABEL),
        ];

        match self.kind() {
            ChartKind::Line => {
                for (s, color, name) in series {
                    chart
                        .draw_series(xs.iter().zip(s.values.iter().zip(s.std.iter())).map(
                            |(&x, (&y, &e))| {
                                ErrorBar::new_vertical(x, y - e, y, y + e, color.stroke_width(2), 6)
                            },
                        ))
                        .map_err(to_render_err)?;
                    chart
                        .draw_series(LineSeries::new(
                            xs.iter().zip(&s.values).map(|(&x, &y)| (x, y)),
                            color.stroke_width(2),
                        ))
                        .map_err(to_render_err)?
                        .label(name)
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }

                // Shaded band between the treatment and control lines.
                let mut band: Vec<(f64, f64)> = xs
                    .iter()
                    .zip(&self.treatment_series().values)
                    .map(|(&x, &y)| (x, y))
                    .collect();
                band.extend(
                    xs.iter()
                        .zip(&self.control_series().values)
                        .rev()
                        .map(|(&x, &y)| (x, y)),
                );
                chart
                    .draw_series(std::iter::once(Polygon::new(band, RED.mix(0.1))))
                    .map_err(to_render_err)?;

                if self.has_zero_line() {
                    chart
                        .draw_series(LineSeries::new(
                            vec![(x_min, 0.0), (x_max, 0.0)],
                            BLACK.stroke_width(1),
                        ))
                        .map_err(to_render_err)?;
                }
            }
            ChartKind::Bar => {
                let positions = self.bar_positions().unwrap_or_default();
                let half = self.bar_width() / 2.0;
                for (slot, (s, color, name)) in series.into_iter().enumerate() {
                    chart
                        .draw_series(positions.iter().zip(&s.values).map(|(group, &v)| {
                            let x = group[slot];
                            // Bars grow from zero in either direction.
                            let (top, bottom) = if v >= 0.0 { (v, 0.0) } else { (0.0, v) };
                            Rectangle::new([(x - half, top), (x + half, bottom)], color.filled())
                        }))
                        .map_err(to_render_err)?
                        .label(name)
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                        });
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(to_render_err)?;

        Ok(())
    }

    /// Render into a standalone SVG document sized by `figsize` at 100 px
    /// per unit.
    pub fn to_svg_string(&self) -> Result<String> {
        let (w, h) = self.figsize();
        let width = (w * 100.0).max(1.0) as u32;
        let height = (h * 100.0).max(1.0) as u32;
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(to_render_err)?;
        }
        Ok(svg)
    }

    fn axis_ranges(&self) -> (Range<f64>, Range<f64>) {
        let xs = self.percentiles();
        let pad = self.inter_bin_spacing() * 0.75;
        let x_min = xs.first().copied().unwrap_or(0.0) - pad;
        let x_max = xs.last().copied().unwrap_or(100.0) + pad;

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in [
            self.treatment_series(),
            self.control_series(),
            self.uplift_series(),
        ] {
            for (&v, &e) in s.values.iter().zip(&s.std) {
                if v.is_finite() {
                    let e = if e.is_finite() { e } else { 0.0 };
                    y_min = y_min.min(v - e);
                    y_max = y_max.max(v + e);
                }
            }
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }
        // Bars grow from zero and the reference line sits at zero; keep
        // zero inside the frame for both.
        if self.kind() == ChartKind::Bar || self.has_zero_line() {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        let margin = (y_max - y_min).max(1e-6) * 0.05;
        (x_min..x_max, (y_min - margin)..(y_max + margin))
    }
}
