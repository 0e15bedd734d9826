//! Chart Plotter Module
//! Renders the class scatter plot and the feature-average bar chart to PNG
//! files with plotters.

use crate::data::{FeatureMatrix, LabelVector};
use crate::stats::StatsTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CLASS_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const CLASS_ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Scatter color per class label
pub const CLASS_COLORS: [(i64, RGBColor); 2] = [(0, CLASS_BLUE), (1, CLASS_ORANGE)];

/// Bar colors, cycled when there are more than four features
pub const BAR_PALETTE: [RGBColor; 4] = [
    CLASS_BLUE,
    CLASS_ORANGE,
    RGBColor(0, 128, 0), // Green
    RGBColor(255, 0, 0), // Red
];

const POINT_SIZE: i32 = 5;
const POINT_ALPHA: f64 = 0.7;
const GRID_ALPHA: f64 = 0.25;
/// Horizontal gap in pixels on each side of a bar.
const BAR_GAP: u32 = 12;
/// Fraction of the data span added on each side of an axis.
const AXIS_PAD: f64 = 0.05;

pub const SCATTER_FILE: &str = "scatter.png";
pub const BAR_CHART_FILE: &str = "averages.png";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Feature index {index} is out of range ({count} features)")]
    FeatureOutOfRange { index: usize, count: usize },
    #[error("Failed to create chart directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to render {chart}: {message}")]
    Render { chart: &'static str, message: String },
    #[error("Failed to open '{}' in the default viewer: {source}", .path.display())]
    Viewer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Points of one class on the scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSeries {
    pub label: i64,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Creates the static report charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Group (x, y) feature pairs by class label. Classes without points are left out.
    pub fn class_series(
        features: &FeatureMatrix,
        labels: &LabelVector,
        x_feature: usize,
        y_feature: usize,
    ) -> Result<Vec<ClassSeries>, ChartError> {
        let xs = Self::feature_column(features, x_feature)?;
        let ys = Self::feature_column(features, y_feature)?;

        let series = CLASS_COLORS
            .iter()
            .map(|&(label, color)| ClassSeries {
                label,
                color,
                points: labels
                    .as_slice()
                    .iter()
                    .zip(xs.iter().zip(ys))
                    .filter(|(l, _)| **l == label)
                    .map(|(_, (&x, &y))| (x, y))
                    .collect(),
            })
            .filter(|series| !series.points.is_empty())
            .collect();

        Ok(series)
    }

    fn feature_column(features: &FeatureMatrix, index: usize) -> Result<&[f64], ChartError> {
        features
            .column(index)
            .ok_or(ChartError::FeatureOutOfRange {
                index,
                count: features.feature_count(),
            })
    }

    /// Render the class scatter plot of two features to `path`.
    pub fn render_scatter(
        features: &FeatureMatrix,
        labels: &LabelVector,
        (x_feature, y_feature): (usize, usize),
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let series = Self::class_series(features, labels, x_feature, y_feature)?;
        let x_name = features.name(x_feature).unwrap_or_default();
        let y_name = features.name(y_feature).unwrap_or_default();

        let root = BitMapBackend::new(path, size).into_drawing_area();
        Self::draw_scatter(&root, &series, x_name, y_name).map_err(|e| ChartError::Render {
            chart: "scatter plot",
            message: e.to_string(),
        })?;

        info!(path = %path.display(), series = series.len(), "rendered scatter plot");
        Ok(())
    }

    /// Render the bar chart of feature averages to `path`.
    pub fn render_bar_chart(
        stats: &StatsTable,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        Self::draw_bar_chart(&root, stats).map_err(|e| ChartError::Render {
            chart: "bar chart",
            message: e.to_string(),
        })?;

        info!(path = %path.display(), bars = stats.len(), "rendered bar chart");
        Ok(())
    }

    fn draw_scatter(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        series: &[ClassSeries],
        x_name: &str,
        y_name: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        root.fill(&WHITE)?;

        let x_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let y_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("Feature Comparison: {x_name} vs {y_name}"),
                ("sans-serif", 24).into_font(),
            )
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(x_name)
            .y_desc(y_name)
            .draw()?;

        let grid_style = BLACK.mix(GRID_ALPHA).stroke_width(1);
        for x in grid_ticks(&x_range) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x, y_range.start), (x, y_range.end)],
                6,
                4,
                grid_style,
            ))?;
        }
        for y in grid_ticks(&y_range) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x_range.start, y), (x_range.end, y)],
                6,
                4,
                grid_style,
            ))?;
        }

        for class in series {
            let fill = class.color.mix(POINT_ALPHA).filled();
            let border = WHITE.stroke_width(1);
            chart
                .draw_series(class.points.iter().map(|&point| {
                    EmptyElement::at(point)
                        + Circle::new((0, 0), POINT_SIZE, fill)
                        + Circle::new((0, 0), POINT_SIZE, border)
                }))?
                .label(format!("Class {}", class.label))
                .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, fill));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn draw_bar_chart(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        stats: &StatsTable,
    ) -> Result<(), Box<dyn std::error::Error>> {
        root.fill(&WHITE)?;

        let names: Vec<String> = stats.iter().map(|s| s.name.clone()).collect();
        let averages = stats.averages();
        // One segment per bar; a lone bar still gets a two-slot axis
        let slots = averages.len().max(2);
        let y_range = padded_range(averages.iter().copied().chain([0.0]));

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Average Feature Values Comparison",
                ("sans-serif", 24).into_font(),
            )
            .margin(20)
            .x_label_area_size(110)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slots - 1).into_segmented(), y_range.clone())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(slots)
            .x_label_formatter(&|x| tick_name(&names, x))
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc("Measurement Features")
            .y_desc("Average Value")
            .draw()?;

        let grid_style = BLACK.mix(GRID_ALPHA).stroke_width(1);
        for y in grid_ticks(&y_range) {
            chart.draw_series(DashedLineSeries::new(
                vec![(SegmentValue::Exact(0), y), (SegmentValue::Last, y)],
                6,
                4,
                grid_style,
            ))?;
        }

        chart.draw_series(averages.iter().enumerate().map(|(i, &mean)| {
            let right = if i + 1 < slots {
                SegmentValue::Exact(i + 1)
            } else {
                SegmentValue::Last
            };
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (right, mean)],
                BAR_PALETTE[i % BAR_PALETTE.len()].filled(),
            );
            bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
            bar
        }))?;

        root.present()?;
        Ok(())
    }
}

/// Feature name under each bar's center; blank at segment edges.
fn tick_name(names: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(index) => names.get(*index).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Axis range covering all values, padded on both sides.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * AXIS_PAD
    } else {
        // Single distinct value
        min.abs().max(1.0) * 0.5
    };
    (min - pad)..(max + pad)
}

/// Gridline positions at a "nice" step inside the range.
fn grid_ticks(range: &Range<f64>) -> Vec<f64> {
    let step = nice_step(range.end - range.start, 8);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (range.start / step).ceil() as i64;
    let last = (range.end / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}
