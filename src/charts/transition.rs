//! Transition Module
//! Eased interpolation from the scene on screen to a new target scene.

use crate::charts::scale::lerp;
use crate::charts::{LinearScale, Scales, Scene, TickMark};

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An in-flight animation between two selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    started_at: f64,
    duration: f64,
    from_points: Vec<[f64; 2]>,
    from_x_ticks: Vec<TickMark>,
    from_y_ticks: Vec<TickMark>,
    from_scales: Scales,
}

impl Transition {
    /// Start animating away from `shown`, the scene currently on screen.
    ///
    /// `started_at` and `duration` are in seconds.
    pub fn new(started_at: f64, duration: f64, shown: Scene, from_scales: Scales) -> Self {
        Self {
            started_at,
            duration,
            from_points: shown.point_positions(),
            from_x_ticks: shown.x_ticks,
            from_y_ticks: shown.y_ticks,
            from_scales,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out((now - self.started_at) / self.duration)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= self.duration
    }

    /// Scales as currently displayed, heading towards `to`.
    pub fn displayed_scales(&self, to: &Scales, now: f64) -> Scales {
        Scales::blend(&self.from_scales, to, self.progress(now))
    }

    /// Interpolate `target` back towards the starting positions.
    pub fn apply(&self, mut target: Scene, to: &Scales, tick_count: usize, now: f64) -> Scene {
        let t = self.progress(now);

        for mark in &mut target.points {
            if let Some(from) = self.from_points.get(mark.index) {
                mark.center = [lerp(from[0], mark.center[0], t), lerp(from[1], mark.center[1], t)];
            }
        }

        target.x_ticks = blend_ticks(&self.from_x_ticks, &self.from_scales.x, &to.x, tick_count, t);
        target.y_ticks = blend_ticks(&self.from_y_ticks, &self.from_scales.y, &to.y, tick_count, t);
        target
    }
}

/// Ticks heading from `shown` to the ticks of `to`.
///
/// Shared ticks slide and become opaque, new ones fade in from their position
/// on `from`, and shown ticks missing from `to` fade out from their current opacity.
pub fn blend_ticks(
    shown: &[TickMark],
    from: &LinearScale,
    to: &LinearScale,
    count: usize,
    t: f64,
) -> Vec<TickMark> {
    let new_values = to.ticks(count);
    let same = |a: f64, b: f64| (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0);

    let mut marks: Vec<TickMark> = new_values
        .iter()
        .map(|&value| {
            let target = to.apply(value);
            let label = to.tick_format(count, value);
            match shown.iter().find(|m| same(m.value, value)) {
                Some(mark) => TickMark {
                    value,
                    offset: lerp(mark.offset, target, t),
                    label,
                    opacity: lerp(mark.opacity, 1.0, t),
                },
                None => TickMark {
                    value,
                    offset: lerp(from.apply(value), target, t),
                    label,
                    opacity: t,
                },
            }
        })
        .collect();

    if t < 1.0 {
        marks.extend(
            shown
                .iter()
                .filter(|m| !new_values.iter().any(|&v| same(v, m.value)))
                .map(|m| TickMark {
                    value: m.value,
                    offset: lerp(m.offset, to.apply(m.value), t),
                    label: m.label.clone(),
                    opacity: m.opacity * (1.0 - t),
                }),
        );
    }

    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::scene::axis_ticks;
    use crate::charts::{build_scene, ChartDimensions, MarkStyle, Viewport};
    use crate::config::LayoutConfig;
    use crate::data::AxisSelection;

    fn empty_scene(scales: &Scales) -> Scene {
        let dims = ChartDimensions::for_viewport(Viewport::new(1200.0, 800.0), &LayoutConfig::default());
        build_scene(&[], AxisSelection::default(), scales, &dims, MarkStyle::default())
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
        assert_eq!(ease_cubic_in_out(-1.0), 0.0);
        assert_eq!(ease_cubic_in_out(3.0), 1.0);
    }

    #[test]
    fn progress_follows_clock() {
        let scale = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        let scales = Scales { x: scale, y: scale };
        let transition = Transition::new(10.0, 1.0, empty_scene(&scales), scales);

        assert_eq!(transition.progress(10.0), 0.0);
        assert_eq!(transition.progress(10.5), 0.5);
        assert_eq!(transition.progress(11.0), 1.0);
        assert!(!transition.is_finished(10.99));
        assert!(transition.is_finished(11.0));
    }

    #[test]
    fn zero_duration_is_immediate() {
        let scale = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        let scales = Scales { x: scale, y: scale };
        let transition = Transition::new(0.0, 0.0, empty_scene(&scales), scales);
        assert_eq!(transition.progress(0.0), 1.0);
        assert!(transition.is_finished(0.0));
    }

    #[test]
    fn unchanged_scale_keeps_ticks_opaque() {
        let scale = LinearScale::new([0.0, 10.0], [0.0, 100.0]);
        let marks = blend_ticks(&axis_ticks(&scale, 10), &scale, &scale, 10, 0.3);
        assert_eq!(marks.len(), 11);
        assert!(marks.iter().all(|m| m.opacity == 1.0));
    }

    #[test]
    fn ticks_fade_between_domains() {
        let from = LinearScale::new([0.0, 10.0], [0.0, 100.0]);
        let to = LinearScale::new([0.0, 100.0], [0.0, 100.0]);
        let shown = axis_ticks(&from, 5);

        let start = blend_ticks(&shown, &from, &to, 5, 0.0);
        // 40 only exists in the new scale and starts invisible at its old position
        let forty = start.iter().find(|m| m.value == 40.0).unwrap();
        assert_eq!(forty.opacity, 0.0);
        assert_eq!(forty.offset, 400.0);

        // 4 only exists in the old scale and fades out
        let four = start.iter().find(|m| m.value == 4.0).unwrap();
        assert_eq!(four.opacity, 1.0);

        let end = blend_ticks(&shown, &from, &to, 5, 1.0);
        assert!(end.iter().all(|m| m.opacity == 1.0));
        assert!(end.iter().all(|m| m.value % 20.0 == 0.0));
        assert_eq!(end.len(), to.ticks(5).len());
    }

    #[test]
    fn half_faded_ticks_continue_from_current_opacity() {
        let from = LinearScale::new([0.0, 10.0], [0.0, 100.0]);
        let to = LinearScale::new([0.0, 100.0], [0.0, 100.0]);
        let shown = vec![
            TickMark { value: 4.0, offset: 40.0, label: "4".into(), opacity: 0.5 },
            TickMark { value: 40.0, offset: 200.0, label: "40".into(), opacity: 0.5 },
        ];

        // At the start nothing on screen changes
        let start = blend_ticks(&shown, &from, &to, 5, 0.0);
        let four = start.iter().find(|m| m.value == 4.0).unwrap();
        assert_eq!((four.offset, four.opacity), (40.0, 0.5));
        let forty = start.iter().find(|m| m.value == 40.0).unwrap();
        assert_eq!((forty.offset, forty.opacity), (200.0, 0.5));

        let mid = blend_ticks(&shown, &from, &to, 5, 0.5);
        let four = mid.iter().find(|m| m.value == 4.0).unwrap();
        assert_eq!(four.opacity, 0.25);
        assert_eq!(four.label, "4");
        let forty = mid.iter().find(|m| m.value == 40.0).unwrap();
        assert_eq!(forty.opacity, 0.75);
        assert_eq!(forty.offset, 300.0);
    }
}
