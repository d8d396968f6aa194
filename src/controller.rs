//! Chart Controller
//! Owns the axis selection, scales and animation state for one chart and
//! reacts to click, hover and resize events.

use crate::charts::{
    build_scene, ChartDimensions, MarkStyle, Scales, Scene, Tooltip, Transition, Viewport,
};
use crate::config::ChartConfig;
use crate::data::{Axis, AxisSelection, DataPoint, Metric, MetricError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("Metric {metric} does not belong to the {axis} axis")]
    WrongAxis { metric: Metric, axis: Axis },
}

/// Input events, processed one at a time on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// An axis label was clicked
    LabelClicked(Metric),
    /// Pointer position in plotting-area coordinates, `None` once it leaves the canvas
    PointerMoved(Option<[f64; 2]>),
    Resized(Viewport),
}

/// State of one interactive scatter chart.
pub struct ChartController {
    data: Vec<DataPoint>,
    selection: AxisSelection,
    config: ChartConfig,
    dimensions: ChartDimensions,
    scales: Scales,
    transition: Option<Transition>,
    hovered: Option<usize>,
}

impl ChartController {
    /// Size the canvas for the viewport and build scales for the configured selection.
    pub fn initialize(data: Vec<DataPoint>, viewport: Viewport, config: ChartConfig) -> Self {
        let selection = AxisSelection::new(config.initial_x, config.initial_y);
        let dimensions = ChartDimensions::for_viewport(viewport, &config.layout);
        let scales = Scales::for_selection(&data, selection, &dimensions);

        log::debug!(
            "Chart initialized: {} points, {}x{} canvas, x={}, y={}",
            data.len(),
            dimensions.svg_width,
            dimensions.svg_height,
            selection.x(),
            selection.y()
        );

        Self {
            data,
            selection,
            config,
            dimensions,
            scales,
            transition: None,
            hovered: None,
        }
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    pub fn dimensions(&self) -> &ChartDimensions {
        &self.dimensions
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    fn style(&self) -> MarkStyle {
        MarkStyle::from(&self.config)
    }

    fn active_transition(&self, now: f64) -> Option<&Transition> {
        self.transition.as_ref().filter(|t| !t.is_finished(now))
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.active_transition(now).is_some()
    }

    /// Select a metric by column name for an axis.
    ///
    /// Returns `Ok(false)` when it is already selected.
    pub fn select_axis(&mut self, axis: Axis, metric_name: &str, now: f64) -> Result<bool, ChartError> {
        let metric: Metric = metric_name.parse()?;
        self.select_metric(axis, metric, now)
    }

    pub fn select_metric(&mut self, axis: Axis, metric: Metric, now: f64) -> Result<bool, ChartError> {
        if metric.axis() != axis {
            return Err(ChartError::WrongAxis { metric, axis });
        }
        if self.selection.is_active(metric) {
            return Ok(false);
        }

        // Start from whatever is on screen, even mid-animation
        let shown = self.scene(now);
        let from_scales = match self.active_transition(now) {
            Some(t) => t.displayed_scales(&self.scales, now),
            None => self.scales,
        };

        self.selection.select(metric);
        let rebuilt = Scales::for_selection(&self.data, self.selection, &self.dimensions);
        match axis {
            Axis::X => self.scales.x = rebuilt.x,
            Axis::Y => self.scales.y = rebuilt.y,
        }

        self.transition = Some(Transition::new(
            now,
            self.config.transition_secs(),
            shown,
            from_scales,
        ));

        log::debug!("Selected {} on the {} axis", metric, axis);
        Ok(true)
    }

    /// Discard the current chart and rebuild it for a new viewport.
    ///
    /// The selection survives; animation and hover state do not.
    pub fn resize(&mut self, viewport: Viewport) {
        self.dimensions = ChartDimensions::for_viewport(viewport, &self.config.layout);
        self.scales = Scales::for_selection(&self.data, self.selection, &self.dimensions);
        self.transition = None;
        self.hovered = None;

        log::debug!(
            "Chart rebuilt at {}x{}",
            self.dimensions.svg_width,
            self.dimensions.svg_height
        );
    }

    /// Update the hovered point. Returns true when it changed.
    pub fn hover(&mut self, pointer: Option<[f64; 2]>, now: f64) -> bool {
        let hovered = pointer.and_then(|p| self.scene(now).point_at(p).map(|m| m.index));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let index = self.hovered?;
        let point = self.data.get(index)?;
        Some(Tooltip::for_point(index, point, self.selection))
    }

    /// Dispatch one event. Returns true when the chart needs repainting.
    pub fn handle(&mut self, event: ChartEvent, now: f64) -> Result<bool, ChartError> {
        match event {
            ChartEvent::LabelClicked(metric) => self.select_metric(metric.axis(), metric, now),
            ChartEvent::PointerMoved(pointer) => Ok(self.hover(pointer, now)),
            ChartEvent::Resized(viewport) => {
                self.resize(viewport);
                Ok(true)
            }
        }
    }

    /// The scene once any running animation has finished.
    pub fn target_scene(&self) -> Scene {
        build_scene(
            &self.data,
            self.selection,
            &self.scales,
            &self.dimensions,
            self.style(),
        )
    }

    /// The scene to draw at time `now`.
    pub fn scene(&self, now: f64) -> Scene {
        let target = self.target_scene();
        match self.active_transition(now) {
            Some(t) => t.apply(target, &self.scales, self.config.tick_count, now),
            None => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn controller() -> ChartController {
        ChartController::initialize(sample(), Viewport::new(1200.0, 800.0), ChartConfig::default())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn initial_domains() {
        let chart = controller();
        let [x0, x1] = chart.scales().x.domain();
        let [y0, y1] = chart.scales().y.domain();
        assert!(approx(x0, 9.0));
        assert!(approx(x1, 18.9));
        assert!(approx(y0, 9.6));
        assert!(approx(y1, 15.75));
    }

    #[test]
    fn initial_scene() {
        let chart = controller();
        let scene = chart.scene(0.0);
        assert_eq!(scene.points.len(), 2);
        assert_eq!(scene.dimensions.width, 780.0);
        assert_eq!(scene.dimensions.height, 280.0);
        assert_eq!(scene.active_metrics(Axis::X), vec![Metric::Poverty]);
        assert_eq!(scene.active_metrics(Axis::Y), vec![Metric::Healthcare]);
        assert!(!chart.is_animating(0.0));
    }

    #[test]
    fn clicking_active_label_is_noop() {
        let mut chart = controller();
        let before = chart.scene(1.0);

        assert_eq!(chart.handle(ChartEvent::LabelClicked(Metric::Poverty), 1.0), Ok(false));
        assert_eq!(chart.handle(ChartEvent::LabelClicked(Metric::Healthcare), 1.0), Ok(false));

        assert_eq!(chart.selection(), AxisSelection::default());
        assert!(!chart.is_animating(1.0));
        assert_eq!(chart.scene(1.0), before);
    }

    #[test]
    fn x_click_leaves_y_labels_alone() {
        let mut chart = controller();
        let before = chart.target_scene();
        let y_scale = chart.scales().y;

        assert_eq!(chart.handle(ChartEvent::LabelClicked(Metric::Age), 0.0), Ok(true));
        let after = chart.target_scene();

        assert_eq!(after.active_metrics(Axis::X), vec![Metric::Age]);
        let changed: Vec<Metric> = before
            .axis_labels
            .iter()
            .zip(&after.axis_labels)
            .filter(|(b, a)| b.active != a.active)
            .map(|(b, _)| b.metric)
            .collect();
        assert_eq!(changed, vec![Metric::Poverty, Metric::Age]);

        let y_before: Vec<_> = before.labels_for(Axis::Y).collect();
        let y_after: Vec<_> = after.labels_for(Axis::Y).collect();
        assert_eq!(y_before, y_after);
        assert_eq!(chart.scales().y, y_scale);
    }

    #[test]
    fn y_click_leaves_x_labels_alone() {
        let mut chart = controller();
        let before = chart.target_scene();

        assert_eq!(chart.select_axis(Axis::Y, "obesity", 0.0), Ok(true));
        let after = chart.target_scene();

        assert_eq!(after.active_metrics(Axis::Y), vec![Metric::Obesity]);
        assert_eq!(after.active_metrics(Axis::X), vec![Metric::Poverty]);
        let x_before: Vec<_> = before.labels_for(Axis::X).collect();
        let x_after: Vec<_> = after.labels_for(Axis::X).collect();
        assert_eq!(x_before, x_after);

        let [y0, y1] = chart.scales().y.domain();
        assert!(approx(y0, 28.0 * 0.8));
        assert!(approx(y1, 32.0 * 1.05));
    }

    #[test]
    fn selection_change_recomputes_scale_over_full_dataset() {
        let mut chart = controller();
        chart.select_axis(Axis::X, "age", 0.0).unwrap();
        let [x0, x1] = chart.scales().x.domain();
        assert!(approx(x0, 33.0 * 0.9));
        assert!(approx(x1, 38.0 * 1.05));
    }

    #[test]
    fn invalid_selections() {
        let mut chart = controller();
        assert_eq!(
            chart.select_axis(Axis::X, "smokes", 0.0),
            Err(ChartError::WrongAxis { metric: Metric::Smokes, axis: Axis::X })
        );
        assert_eq!(
            chart.select_axis(Axis::Y, "weight", 0.0),
            Err(ChartError::Metric(MetricError::Unknown("weight".into())))
        );
        assert_eq!(chart.selection(), AxisSelection::default());
    }

    #[test]
    fn transition_moves_points_over_one_second() {
        let mut chart = controller();
        let start = chart.scene(5.0).point_positions();

        chart.select_axis(Axis::X, "income", 5.0).unwrap();
        let end = chart.target_scene().point_positions();

        assert!(chart.is_animating(5.0));
        assert_eq!(chart.scene(5.0).point_positions(), start);

        let mid = chart.scene(5.5).point_positions();
        for i in 0..2 {
            let expected = (start[i][0] + end[i][0]) / 2.0;
            assert!(approx(mid[i][0], expected));
            assert!(approx(mid[i][1], start[i][1]));
        }

        assert!(!chart.is_animating(6.0));
        assert_eq!(chart.scene(6.0).point_positions(), end);
    }

    #[test]
    fn interrupted_transition_starts_from_screen() {
        let mut chart = controller();
        chart.select_axis(Axis::X, "income", 0.0).unwrap();
        let on_screen = chart.scene(0.5).point_positions();

        chart.select_axis(Axis::X, "age", 0.5).unwrap();
        assert_eq!(chart.scene(0.5).point_positions(), on_screen);
        assert!(chart.is_animating(1.0));
        assert!(!chart.is_animating(1.5));
    }

    #[test]
    fn interrupting_click_keeps_ticks_on_screen() {
        let mut chart = controller();
        chart.select_axis(Axis::X, "income", 0.0).unwrap();
        let shown = chart.scene(0.5).x_ticks;
        assert!(shown.iter().any(|m| m.value < 100.0 && approx(m.opacity, 0.5)));
        assert!(shown.iter().any(|m| m.value >= 40000.0 && approx(m.opacity, 0.5)));

        chart.select_axis(Axis::Y, "smokes", 0.5).unwrap();
        assert_eq!(chart.scene(0.5).x_ticks, shown);

        // Poverty ticks keep fading from where they were, income ticks keep fading in
        let later = chart.scene(1.0).x_ticks;
        for mark in &later {
            if mark.value < 100.0 {
                assert!(approx(mark.opacity, 0.25));
            } else {
                assert!(approx(mark.opacity, 0.75));
            }
        }

        let settled = chart.scene(1.5).x_ticks;
        assert!(settled.iter().all(|m| m.value >= 40000.0 && m.opacity == 1.0));
    }

    #[test]
    fn resize_rebuilds_without_duplicates() {
        let mut chart = controller();
        chart.select_axis(Axis::Y, "smokes", 0.0).unwrap();

        assert_eq!(chart.handle(ChartEvent::Resized(Viewport::new(500.0, 500.0)), 0.2), Ok(true));

        let scene = chart.scene(0.2);
        assert!(!chart.is_animating(0.2));
        assert_eq!(scene.points.len(), 2);
        assert_eq!(scene.axis_labels.len(), 6);
        assert_eq!(scene.dimensions.svg_width, 500.0);
        assert_eq!(scene.dimensions.svg_height, 300.0);
        assert_eq!(chart.scales().x.range(), [0.0, 380.0]);
        assert_eq!(chart.scales().y.range(), [180.0, 0.0]);
        assert_eq!(chart.selection().y(), Metric::Smokes);
    }

    #[test]
    fn hover_shows_tooltip_for_current_axes() {
        let mut chart = controller();
        let alaska = chart.scene(0.0).points[1].center;

        assert!(chart.handle(ChartEvent::PointerMoved(Some(alaska)), 0.0).unwrap());
        let tip = chart.tooltip().unwrap();
        assert_eq!(tip.index, 1);
        assert_eq!(tip.lines[0], "Alaska");
        assert_eq!(tip.lines[1], "Percent Lacking Healthcare: 15");
        assert_eq!(tip.lines[2], "Percent in Poverty: 10");

        chart.select_axis(Axis::Y, "smokes", 0.0).unwrap();
        assert_eq!(chart.tooltip().unwrap().lines[1], "Percent that Smoke: 20");

        assert!(chart.handle(ChartEvent::PointerMoved(None), 0.0).unwrap());
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn pointer_off_points_has_no_tooltip() {
        let mut chart = controller();
        assert!(!chart.hover(Some([-500.0, -500.0]), 0.0));
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn controllers_are_independent() {
        let mut a = controller();
        let b = controller();
        a.select_axis(Axis::X, "age", 0.0).unwrap();
        assert_eq!(a.selection().x(), Metric::Age);
        assert_eq!(b.selection().x(), Metric::Poverty);
    }

    #[test]
    fn configured_initial_selection() {
        let config = ChartConfig {
            initial_x: Metric::Income,
            initial_y: Metric::Obesity,
            ..ChartConfig::default()
        };
        let chart = ChartController::initialize(sample(), Viewport::new(1200.0, 800.0), config);
        assert_eq!(chart.selection(), AxisSelection::new(Metric::Income, Metric::Obesity));
        assert_eq!(chart.data().len(), 2);
    }
}
