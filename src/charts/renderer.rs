//! Static Chart Renderer
//! Draws a `Scene` into an SVG document with plotters.
//!
//! Layout:
//! 1. White canvas of the scene's outer size
//! 2. Plotting area shifted by the left/top margins
//! 3. Axis lines with ticks and tick labels
//! 4. Circles with their abbreviations
//! 5. Axis titles: active bold black, inactive grey

use crate::charts::scene::{
    ABBR_FONT_SIZE, AXIS_LABEL_FONT_SIZE, POINT_FILL, POINT_OPACITY, TICK_FONT_SIZE, TICK_LENGTH,
};
use crate::charts::{ChartDimensions, Scene};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::fs;
use std::path::Path;
use thiserror::Error;

const STEELBLUE: RGBColor = RGBColor(POINT_FILL[0], POINT_FILL[1], POINT_FILL[2]);
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
const INACTIVE_LABEL: RGBColor = RGBColor(170, 170, 170);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the scene to an SVG string.
    pub fn render_svg(scene: &Scene) -> Result<String, ExportError> {
        let dims = scene.dimensions;
        let size = (
            dims.svg_width.max(1.0).round() as u32,
            dims.svg_height.max(1.0).round() as u32,
        );

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            Self::draw_axes(&root, scene)?;
            Self::draw_points(&root, scene)?;
            Self::draw_axis_labels(&root, scene)?;

            root.present().map_err(draw_err)?;
        }
        Ok(buffer)
    }

    /// Render the scene and write it to `path`.
    pub fn save_svg(scene: &Scene, path: &Path) -> Result<(), ExportError> {
        let svg = Self::render_svg(scene)?;
        fs::write(path, svg)?;
        Ok(())
    }

    fn to_pixel(dims: &ChartDimensions, p: [f64; 2]) -> (i32, i32) {
        let [x, y] = dims.to_canvas(p);
        (x.round() as i32, y.round() as i32)
    }

    fn font<'a>(size: f64, style: FontStyle) -> TextStyle<'a> {
        TextStyle::from(FontDesc::new(FontFamily::SansSerif, size, style))
    }

    fn draw_axes(
        root: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        scene: &Scene,
    ) -> Result<(), ExportError> {
        let dims = &scene.dimensions;

        // X axis along the bottom of the plotting area
        root.draw(&PathElement::new(
            vec![
                Self::to_pixel(dims, [0.0, dims.height]),
                Self::to_pixel(dims, [dims.width, dims.height]),
            ],
            AXIS_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;

        for tick in &scene.x_ticks {
            let color = AXIS_COLOR.mix(tick.opacity);
            let base = Self::to_pixel(dims, [tick.offset, dims.height]);
            let end = Self::to_pixel(dims, [tick.offset, dims.height + TICK_LENGTH]);
            root.draw(&PathElement::new(vec![base, end], color.stroke_width(1)))
                .map_err(draw_err)?;

            let style = Self::font(TICK_FONT_SIZE, FontStyle::Normal)
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(tick.label.clone(), (end.0, end.1 + 3), style))
                .map_err(draw_err)?;
        }

        // Y axis along the left edge
        root.draw(&PathElement::new(
            vec![
                Self::to_pixel(dims, [0.0, 0.0]),
                Self::to_pixel(dims, [0.0, dims.height]),
            ],
            AXIS_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;

        for tick in &scene.y_ticks {
            let color = AXIS_COLOR.mix(tick.opacity);
            let base = Self::to_pixel(dims, [0.0, tick.offset]);
            let end = Self::to_pixel(dims, [-TICK_LENGTH, tick.offset]);
            root.draw(&PathElement::new(vec![base, end], color.stroke_width(1)))
                .map_err(draw_err)?;

            let style = Self::font(TICK_FONT_SIZE, FontStyle::Normal)
                .color(&color)
                .pos(Pos::new(HPos::Right, VPos::Center));
            root.draw(&Text::new(tick.label.clone(), (end.0 - 3, end.1), style))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_points(
        root: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        scene: &Scene,
    ) -> Result<(), ExportError> {
        let dims = &scene.dimensions;
        let fill = STEELBLUE.mix(POINT_OPACITY).filled();
        // Rows with unparseable metrics have no position on the chart
        let drawable: Vec<_> = scene
            .points
            .iter()
            .filter(|p| p.center.iter().all(|c| c.is_finite()))
            .collect();

        for point in &drawable {
            root.draw(&Circle::new(
                Self::to_pixel(dims, point.center),
                point.radius.round() as i32,
                fill,
            ))
            .map_err(draw_err)?;
        }

        // Abbreviations after all circles so no circle covers a label
        let style = Self::font(ABBR_FONT_SIZE, FontStyle::Normal)
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for point in &drawable {
            root.draw(&Text::new(
                point.abbr.clone(),
                Self::to_pixel(dims, point.label_position()),
                style.clone(),
            ))
            .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_axis_labels(
        root: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        scene: &Scene,
    ) -> Result<(), ExportError> {
        let dims = &scene.dimensions;

        for label in &scene.axis_labels {
            let (weight, color) = if label.active {
                (FontStyle::Bold, &AXIS_COLOR)
            } else {
                (FontStyle::Normal, &INACTIVE_LABEL)
            };
            let mut style = Self::font(AXIS_LABEL_FONT_SIZE, weight)
                .color(color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            if label.rotated {
                style = style.transform(FontTransform::Rotate270);
            }

            root.draw(&Text::new(label.text, Self::to_pixel(dims, label.anchor), style))
                .map_err(draw_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_scene, MarkStyle, Scales, Viewport};
    use crate::config::LayoutConfig;
    use crate::data::{AxisSelection, DataPoint};

    fn scene() -> Scene {
        let data = vec![
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
        ];
        let dims = ChartDimensions::for_viewport(Viewport::new(1200.0, 800.0), &LayoutConfig::default());
        let selection = AxisSelection::default();
        let scales = Scales::for_selection(&data, selection, &dims);
        build_scene(&data, selection, &scales, &dims, MarkStyle::default())
    }

    #[test]
    fn svg_has_one_circle_per_point() {
        let svg = StaticChartRenderer::render_svg(&scene()).unwrap();
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("AL"));
        assert!(svg.contains("AK"));
    }

    #[test]
    fn svg_has_every_axis_label() {
        let svg = StaticChartRenderer::render_svg(&scene()).unwrap();
        for label in ["Poverty (%)", "Age (Median)", "Household Income (Median)"] {
            assert!(svg.contains(label), "missing {label}");
        }
        for label in ["Lacks Healthcare (%)", "Smokes (%)", "Obese (%)"] {
            assert!(svg.contains(label), "missing {label}");
        }
    }

    #[test]
    fn points_without_position_are_skipped() {
        let mut scene = scene();
        scene.points[1].center = [f64::NAN, 40.0];
        let svg = StaticChartRenderer::render_svg(&scene).unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains("AL"));
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        StaticChartRenderer::save_svg(&scene(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<circle"));
    }
}
