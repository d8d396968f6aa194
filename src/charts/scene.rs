//! Scene Module
//! Pure description of one frame: circles, abbreviations, axis ticks and axis labels.
//!
//! Coordinates are relative to the inner plotting area; backends add the margins.

use crate::charts::{ChartDimensions, LinearScale, Scales};
use crate::config::ChartConfig;
use crate::data::{Axis, AxisSelection, DataPoint, Metric};

/// Circle fill (steelblue)
pub const POINT_FILL: [u8; 3] = [70, 130, 180];
pub const POINT_OPACITY: f64 = 0.7;
pub const ABBR_FONT_SIZE: f64 = 8.0;
pub const TICK_FONT_SIZE: f64 = 10.0;
pub const TICK_LENGTH: f64 = 6.0;
pub const AXIS_LABEL_FONT_SIZE: f64 = 14.0;

/// Vertical distance between stacked X axis labels.
const X_LABEL_SPACING: f64 = 20.0;
/// Gap between the X axis line and the label group.
const X_LABEL_GROUP_OFFSET: f64 = 20.0;
/// Distance of each Y axis label from the canvas left edge, in label order.
const Y_LABEL_OFFSETS: [f64; 3] = [55.0, 35.0, 15.0];

/// Sizes that come from configuration rather than data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub point_radius: f64,
    pub tick_count: usize,
}

impl From<&ChartConfig> for MarkStyle {
    fn from(config: &ChartConfig) -> Self {
        Self {
            point_radius: config.point_radius,
            tick_count: config.tick_count,
        }
    }
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

/// Circle plus abbreviation for one data point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMark {
    /// Index into the dataset
    pub index: usize,
    pub center: [f64; 2],
    pub radius: f64,
    pub abbr: String,
}

impl PointMark {
    /// Abbreviation sits one pixel below the circle center.
    pub fn label_position(&self) -> [f64; 2] {
        [self.center[0], self.center[1] + 1.0]
    }

    pub fn contains(&self, p: [f64; 2]) -> bool {
        let dx = p[0] - self.center[0];
        let dy = p[1] - self.center[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub value: f64,
    /// Position along the axis (x for the X axis, y for the Y axis)
    pub offset: f64,
    pub label: String,
    pub opacity: f64,
}

/// Clickable axis title.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelMark {
    pub metric: Metric,
    pub text: &'static str,
    /// Center of the text
    pub anchor: [f64; 2],
    /// Drawn rotated by -90 degrees
    pub rotated: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub dimensions: ChartDimensions,
    pub points: Vec<PointMark>,
    pub x_ticks: Vec<TickMark>,
    pub y_ticks: Vec<TickMark>,
    pub axis_labels: Vec<AxisLabelMark>,
}

impl Scene {
    pub fn labels_for(&self, axis: Axis) -> impl Iterator<Item = &AxisLabelMark> {
        self.axis_labels
            .iter()
            .filter(move |l| l.metric.axis() == axis)
    }

    /// Metrics whose label is active on an axis.
    pub fn active_metrics(&self, axis: Axis) -> Vec<Metric> {
        self.labels_for(axis)
            .filter(|l| l.active)
            .map(|l| l.metric)
            .collect()
    }

    pub fn point_positions(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| p.center).collect()
    }

    /// Topmost point under `p`; later points are drawn over earlier ones.
    pub fn point_at(&self, p: [f64; 2]) -> Option<&PointMark> {
        self.points.iter().rev().find(|m| m.contains(p))
    }
}

/// Tick marks for a scale with no transition in progress.
pub fn axis_ticks(scale: &LinearScale, count: usize) -> Vec<TickMark> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| TickMark {
            value,
            offset: scale.apply(value),
            label: scale.tick_format(count, value),
            opacity: 1.0,
        })
        .collect()
}

/// Axis titles in label order, X first.
pub fn axis_labels(selection: AxisSelection, dimensions: &ChartDimensions) -> Vec<AxisLabelMark> {
    let x_labels = Metric::X_METRICS.iter().enumerate().map(|(i, &metric)| {
        AxisLabelMark {
            metric,
            text: metric.axis_label(),
            anchor: [
                dimensions.width / 2.0,
                dimensions.height + X_LABEL_GROUP_OFFSET + X_LABEL_SPACING * (i + 1) as f64,
            ],
            rotated: false,
            active: selection.is_active(metric),
        }
    });

    let y_labels = Metric::Y_METRICS
        .iter()
        .zip(Y_LABEL_OFFSETS)
        .map(|(&metric, offset)| AxisLabelMark {
            metric,
            text: metric.axis_label(),
            anchor: [offset - dimensions.margin.left, dimensions.height / 2.0],
            rotated: true,
            active: selection.is_active(metric),
        });

    x_labels.chain(y_labels).collect()
}

/// Lay out the chart for a selection. Pure function of its inputs.
pub fn build_scene(
    data: &[DataPoint],
    selection: AxisSelection,
    scales: &Scales,
    dimensions: &ChartDimensions,
    style: MarkStyle,
) -> Scene {
    let points = data
        .iter()
        .enumerate()
        .map(|(index, d)| PointMark {
            index,
            center: [
                scales.x.apply(d.value(selection.x())),
                scales.y.apply(d.value(selection.y())),
            ],
            radius: style.point_radius,
            abbr: d.abbr.clone(),
        })
        .collect();

    Scene {
        dimensions: *dimensions,
        points,
        x_ticks: axis_ticks(&scales.x, style.tick_count),
        y_ticks: axis_ticks(&scales.y, style.tick_count),
        axis_labels: axis_labels(selection, dimensions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Viewport;
    use crate::config::LayoutConfig;

    fn dims() -> ChartDimensions {
        ChartDimensions::for_viewport(Viewport::new(1200.0, 800.0), &LayoutConfig::default())
    }

    fn sample() -> Vec<DataPoint> {
        vec![
            DataPoint {
                state: "Alabama".into(),
                abbr: "AL".into(),
                poverty: 18.0,
                age: 38.0,
                income: 42000.0,
                healthcare: 12.0,
                smokes: 22.0,
                obesity: 32.0,
            },
            DataPoint {
                state: "Alaska".into(),
                abbr: "AK".into(),
                poverty: 10.0,
                age: 33.0,
                income: 70000.0,
                healthcare: 15.0,
                smokes: 20.0,
                obesity: 28.0,
            },
        ]
    }

    #[test]
    fn one_mark_per_data_point() {
        let data = sample();
        let selection = AxisSelection::default();
        let dims = dims();
        let scales = Scales::for_selection(&data, selection, &dims);
        let scene = build_scene(&data, selection, &scales, &dims, MarkStyle::default());

        assert_eq!(scene.points.len(), 2);
        assert_eq!(scene.points[0].abbr, "AL");
        assert_eq!(scene.points[0].radius, 10.0);
        assert_eq!(scene.points[0].center[0], scales.x.apply(18.0));
        assert_eq!(scene.points[1].center[1], scales.y.apply(15.0));
        assert_eq!(scene.points[1].label_position()[1], scene.points[1].center[1] + 1.0);
    }

    #[test]
    fn exactly_one_active_label_per_axis() {
        let mut selection = AxisSelection::default();
        selection.select(Metric::Income);
        let labels = axis_labels(selection, &dims());

        assert_eq!(labels.len(), 6);
        let active: Vec<Metric> = labels.iter().filter(|l| l.active).map(|l| l.metric).collect();
        assert_eq!(active, vec![Metric::Income, Metric::Healthcare]);
    }

    #[test]
    fn label_positions() {
        let dims = dims();
        let labels = axis_labels(AxisSelection::default(), &dims);

        assert_eq!(labels[0].anchor, [390.0, 320.0]);
        assert_eq!(labels[2].anchor, [390.0, 360.0]);
        assert!(!labels[0].rotated);

        assert_eq!(labels[3].metric, Metric::Healthcare);
        assert_eq!(labels[3].anchor, [-45.0, 140.0]);
        assert_eq!(labels[5].anchor, [-85.0, 140.0]);
        assert!(labels[5].rotated);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let scene = Scene {
            dimensions: dims(),
            points: vec![
                PointMark { index: 0, center: [10.0, 10.0], radius: 10.0, abbr: "A".into() },
                PointMark { index: 1, center: [15.0, 10.0], radius: 10.0, abbr: "B".into() },
            ],
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            axis_labels: Vec::new(),
        };

        assert_eq!(scene.point_at([12.0, 10.0]).map(|p| p.index), Some(1));
        assert_eq!(scene.point_at([1.0, 10.0]).map(|p| p.index), Some(0));
        assert!(scene.point_at([40.0, 40.0]).is_none());
    }
}
