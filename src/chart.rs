//! Geometry of the monthly line charts.
//!
//! Values are scaled between the smallest and largest value shown on the
//! chart. Missing months are drawn on the baseline.

use crate::month::{MONTH_LABELS, MonthIndex};
use crate::series::Series;
use std::fmt::{self, Write};

pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 300.0;

const X_ORIGIN: f64 = 120.0;
const X_STEP: f64 = 55.0;
const Y_BASE: f64 = 250.0;
const Y_TOP: f64 = 50.0;
const Y_SPAN: f64 = 180.0;
const MIN_RANGE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl ChartScale {
    /// Fit the scale to every present value of `series`.
    pub fn fit(series: &[&Series]) -> Self {
        let (min, max) = series
            .iter()
            .flat_map(|s| s.present().map(|(_, val)| val))
            .fold(None, |acc: Option<(f64, f64)>, val| match acc {
                None => Some((val, val)),
                Some((min, max)) => Some((min.min(val), max.max(val))),
            })
            .unwrap_or((0.0, 1.0));
        Self {
            min,
            max,
            range: (max - min).max(MIN_RANGE),
        }
    }

    pub fn point(&self, month: MonthIndex, val: Option<f64>) -> (f64, f64) {
        let x = X_ORIGIN + month.get() as f64 * X_STEP;
        let y = match val {
            Some(val) => Y_BASE - (val - self.min) / self.range * Y_SPAN,
            None => Y_BASE,
        };
        (x, y)
    }

    pub fn points(&self, series: &Series) -> Vec<(f64, f64)> {
        MonthIndex::all()
            .zip(series.slots())
            .map(|(month, &val)| self.point(month, val))
            .collect()
    }

    /// SVG path data through all twelve months.
    pub fn path(&self, series: &Series) -> String {
        let coords: Vec<_> = self
            .points(series)
            .iter()
            .map(|(x, y)| format!("{x} {y}"))
            .collect();
        format!("M {}", coords.join(" L "))
    }

    /// Axis values from top to bottom, at quarter steps.
    pub fn ticks(&self) -> [f64; 5] {
        [
            self.max,
            self.max - self.range * 0.25,
            self.max - self.range * 0.5,
            self.max - self.range * 0.75,
            self.min,
        ]
    }
}

/// A series to draw and its stroke color.
pub struct Line<'a> {
    pub series: &'a Series,
    pub color: &'a str,
}

/// Render `lines` into a standalone SVG document sharing one scale.
pub fn render_svg(title: &str, unit: &str, lines: &[Line]) -> Result<String, fmt::Error> {
    let all: Vec<_> = lines.iter().map(|line| line.series).collect();
    let scale = ChartScale::fit(&all);

    let mut svg = String::new();
    write_svg(&mut svg, &scale, title, unit, lines)?;
    Ok(svg)
}

fn write_svg(
    svg: &mut String,
    scale: &ChartScale,
    title: &str,
    unit: &str,
    lines: &[Line],
) -> fmt::Result {
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW_WIDTH} {VIEW_HEIGHT}">"#
    )?;
    writeln!(svg, "<title>{}</title>", escape(title))?;

    for y in (0..5).map(|i| Y_TOP + i as f64 * 50.0) {
        writeln!(
            svg,
            r##"<line x1="60" y1="{y}" x2="750" y2="{y}" stroke="#374151" opacity="0.3"/>"##
        )?;
    }
    for month in MonthIndex::all() {
        let (x, _) = scale.point(month, None);
        writeln!(
            svg,
            r##"<line x1="{x}" y1="{Y_TOP}" x2="{x}" y2="{Y_BASE}" stroke="#374151" opacity="0.3"/>"##
        )?;
    }

    for line in lines {
        let color = escape(line.color);
        writeln!(
            svg,
            r#"<path d="{}" stroke="{color}" stroke-width="3" fill="none"/>"#,
            scale.path(line.series)
        )?;
        for (x, y) in scale.points(line.series) {
            writeln!(svg, r#"<circle cx="{x}" cy="{y}" r="4" fill="{color}"/>"#)?;
        }
    }

    for (i, tick) in scale.ticks().iter().enumerate() {
        let y = Y_TOP + 5.0 + i as f64 * 50.0;
        writeln!(svg, r#"<text x="40" y="{y}">{tick:.0}</text>"#)?;
    }
    for (month, label) in MonthIndex::all().zip(MONTH_LABELS) {
        let (x, _) = scale.point(month, None);
        writeln!(
            svg,
            r#"<text x="{x}" y="275" text-anchor="middle">{label}</text>"#
        )?;
    }
    writeln!(
        svg,
        r#"<text x="{}" y="295" text-anchor="middle">Mois</text>"#,
        VIEW_WIDTH / 2.0
    )?;
    writeln!(
        svg,
        r#"<text x="25" y="160" text-anchor="middle" transform="rotate(-90 25 160)">{}</text>"#,
        escape(unit)
    )?;
    writeln!(svg, "</svg>")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::N_MONTHS;

    fn series(vals: &[Option<f64>]) -> Series {
        let mut slots = [None; N_MONTHS];
        slots[..vals.len()].copy_from_slice(vals);
        Series::from_slots(slots)
    }

    #[test]
    fn scale_spans_all_series() {
        let a = series(&[Some(2.0), Some(6.0)]);
        let b = series(&[None, Some(-2.0)]);
        let scale = ChartScale::fit(&[&a, &b]);
        assert_eq!(scale.min, -2.0);
        assert_eq!(scale.max, 6.0);
        assert_eq!(scale.range, 8.0);
        assert_eq!(scale.ticks(), [6.0, 4.0, 2.0, 0.0, -2.0]);
    }

    #[test]
    fn empty_scale_defaults_to_unit_range() {
        let scale = ChartScale::fit(&[&Series::default()]);
        assert_eq!((scale.min, scale.max, scale.range), (0.0, 1.0, 1.0));
    }

    #[test]
    fn flat_series_keeps_a_positive_range() {
        let flat = series(&[Some(3.0), Some(3.0)]);
        let scale = ChartScale::fit(&[&flat]);
        assert_eq!(scale.range, MIN_RANGE);
        let (_, y) = scale.point(MonthIndex::new(0).unwrap(), Some(3.0));
        assert_eq!(y, Y_BASE);
    }

    #[test]
    fn points_map_min_and_max_to_chart_edges() {
        let s = series(&[Some(0.0), Some(10.0), None]);
        let points = ChartScale::fit(&[&s]).points(&s);
        assert_eq!(points.len(), 12);
        assert_eq!(points[0], (120.0, 250.0));
        assert_eq!(points[1], (175.0, 70.0));
        assert_eq!(points[2], (230.0, 250.0));
        assert_eq!(points[11].0, 725.0);
    }

    #[test]
    fn path_visits_every_month() {
        let s = series(&[Some(0.0), Some(10.0)]);
        let path = ChartScale::fit(&[&s]).path(&s);
        assert!(path.starts_with("M 120 250 L 175 70 L 230 250"));
        assert_eq!(path.matches(" L ").count(), 11);
    }

    #[test]
    fn svg_contains_one_path_per_line() {
        let a = series(&[Some(1.0)]);
        let b = series(&[Some(2.0)]);
        let svg = render_svg(
            "Temperatures 2022 vs 2023",
            "°C",
            &[
                Line {
                    series: &a,
                    color: "#f97316",
                },
                Line {
                    series: &b,
                    color: "#ef4444",
                },
            ],
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 24);
        assert!(svg.contains(">Aoû<"));
    }

    #[test]
    fn svg_labels_both_axes() {
        let s = series(&[Some(-4.0), Some(12.0)]);
        let svg = render_svg(
            "Pollution (AQI) 2022 vs 2023",
            "AQI",
            &[Line {
                series: &s,
                color: "#8b5cf6",
            }],
        )
        .unwrap();
        assert!(svg.contains(r#"<text x="400" y="295" text-anchor="middle">Mois</text>"#));
        assert!(svg.contains(r#"rotate(-90 25 160)">AQI</text>"#));
        assert!(svg.contains(">12</text>"));
        assert!(svg.contains(">-4</text>"));
    }
}
