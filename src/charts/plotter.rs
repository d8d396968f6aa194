//! Chart Plotter Module
//! Paints a `Scene` onto an egui canvas.

use crate::charts::scene::{
    ABBR_FONT_SIZE, AXIS_LABEL_FONT_SIZE, POINT_FILL, POINT_OPACITY, TICK_FONT_SIZE, TICK_LENGTH,
};
use crate::charts::{AxisLabelMark, Scene, Tooltip};
use crate::data::Metric;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2, Visuals};
use std::f32::consts::FRAC_PI_2;

pub const POINT_COLOR: Color32 = Color32::from_rgb(POINT_FILL[0], POINT_FILL[1], POINT_FILL[2]);
const TOOLTIP_BG: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200);
const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 6.0;

/// Where an axis label was painted, for click hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct LabelHitbox {
    pub metric: Metric,
    pub rect: Rect,
}

/// Paints scenes with the egui painter.
pub struct ChartPlotter;

impl ChartPlotter {
    fn to_screen(origin: Pos2, p: [f64; 2]) -> Pos2 {
        origin + Vec2::new(p[0] as f32, p[1] as f32)
    }

    /// Draw a full scene with the plotting area's top-left corner at `origin`.
    pub fn paint_scene(
        painter: &Painter,
        origin: Pos2,
        scene: &Scene,
        visuals: &Visuals,
    ) -> Vec<LabelHitbox> {
        Self::paint_axes(painter, origin, scene, visuals.text_color());
        Self::paint_points(painter, origin, scene);

        scene
            .axis_labels
            .iter()
            .map(|label| LabelHitbox {
                metric: label.metric,
                rect: Self::paint_axis_label(painter, origin, label, visuals),
            })
            .collect()
    }

    fn paint_axes(painter: &Painter, origin: Pos2, scene: &Scene, color: Color32) {
        let dims = &scene.dimensions;
        let stroke = Stroke::new(1.0, color);
        let font = FontId::proportional(TICK_FONT_SIZE as f32);

        painter.line_segment(
            [
                Self::to_screen(origin, [0.0, dims.height]),
                Self::to_screen(origin, [dims.width, dims.height]),
            ],
            stroke,
        );
        for tick in &scene.x_ticks {
            let tick_color = color.gamma_multiply(tick.opacity as f32);
            let base = Self::to_screen(origin, [tick.offset, dims.height]);
            let end = Self::to_screen(origin, [tick.offset, dims.height + TICK_LENGTH]);
            painter.line_segment([base, end], Stroke::new(1.0, tick_color));
            painter.text(
                end + Vec2::new(0.0, 3.0),
                Align2::CENTER_TOP,
                &tick.label,
                font.clone(),
                tick_color,
            );
        }

        painter.line_segment(
            [
                Self::to_screen(origin, [0.0, 0.0]),
                Self::to_screen(origin, [0.0, dims.height]),
            ],
            stroke,
        );
        for tick in &scene.y_ticks {
            let tick_color = color.gamma_multiply(tick.opacity as f32);
            let base = Self::to_screen(origin, [0.0, tick.offset]);
            let end = Self::to_screen(origin, [-TICK_LENGTH, tick.offset]);
            painter.line_segment([base, end], Stroke::new(1.0, tick_color));
            painter.text(
                end - Vec2::new(3.0, 0.0),
                Align2::RIGHT_CENTER,
                &tick.label,
                font.clone(),
                tick_color,
            );
        }
    }

    fn paint_points(painter: &Painter, origin: Pos2, scene: &Scene) {
        let fill = POINT_COLOR.gamma_multiply(POINT_OPACITY as f32);
        let drawable: Vec<_> = scene
            .points
            .iter()
            .filter(|p| p.center.iter().all(|c| c.is_finite()))
            .collect();

        for point in &drawable {
            painter.circle_filled(
                Self::to_screen(origin, point.center),
                point.radius as f32,
                fill,
            );
        }

        let font = FontId::proportional(ABBR_FONT_SIZE as f32);
        for point in &drawable {
            painter.text(
                Self::to_screen(origin, point.label_position()),
                Align2::CENTER_CENTER,
                &point.abbr,
                font.clone(),
                Color32::WHITE,
            );
        }
    }

    /// Returns the screen rectangle covered by the label.
    fn paint_axis_label(
        painter: &Painter,
        origin: Pos2,
        label: &AxisLabelMark,
        visuals: &Visuals,
    ) -> Rect {
        let color = if label.active {
            visuals.strong_text_color()
        } else {
            visuals.weak_text_color()
        };
        let galley = painter.layout_no_wrap(
            label.text.to_string(),
            FontId::proportional(AXIS_LABEL_FONT_SIZE as f32),
            color,
        );
        let size = galley.size();
        let anchor = Self::to_screen(origin, label.anchor);

        if label.rotated {
            // Rotating by -90 degrees turns the text upwards around its top-left corner
            let pos = Pos2::new(anchor.x - size.y / 2.0, anchor.y + size.x / 2.0);
            painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2));
            Rect::from_center_size(anchor, Vec2::new(size.y, size.x))
        } else {
            let rect = Rect::from_center_size(anchor, size);
            painter.galley(rect.min, galley, color);
            rect
        }
    }

    /// Tooltip box just below and right of the pointer.
    pub fn paint_tooltip(painter: &Painter, pointer: Pos2, tooltip: &Tooltip) {
        let galley = painter.layout_no_wrap(
            tooltip.text(),
            FontId::proportional(TOOLTIP_FONT_SIZE),
            Color32::WHITE,
        );
        let rect = Rect::from_min_size(
            pointer + Vec2::splat(12.0),
            galley.size() + Vec2::splat(TOOLTIP_PADDING * 2.0),
        );
        painter.rect_filled(rect, 4.0, TOOLTIP_BG);
        painter.galley(rect.min + Vec2::splat(TOOLTIP_PADDING), galley, Color32::WHITE);
    }
}
