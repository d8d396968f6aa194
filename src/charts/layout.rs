//! Canvas sizing from the window viewport.

use crate::config::{LayoutConfig, Margin};

/// Size of the window the chart lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Outer canvas size, margins, and the inner plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub svg_width: f64,
    pub svg_height: f64,
    pub margin: Margin,
    /// Inner plotting width (canvas minus left/right margins)
    pub width: f64,
    /// Inner plotting height (canvas minus top/bottom margins)
    pub height: f64,
}

impl ChartDimensions {
    pub fn for_viewport(viewport: Viewport, layout: &LayoutConfig) -> Self {
        let svg_width = if viewport.width < layout.min_viewport {
            layout.floor_width
        } else {
            viewport.width * layout.width_fraction
        };
        let svg_height = if viewport.height < layout.min_viewport {
            layout.floor_height
        } else {
            viewport.height * layout.height_fraction
        };

        let margin = layout.margin;
        Self {
            svg_width,
            svg_height,
            margin,
            width: svg_width - margin.left - margin.right,
            height: svg_height - margin.top - margin.bottom,
        }
    }

    /// Chart-area coordinates to canvas coordinates.
    pub fn to_canvas(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0] + self.margin.left, p[1] + self.margin.top]
    }

    /// Canvas coordinates to chart-area coordinates.
    pub fn to_chart(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0] - self.margin.left, p[1] - self.margin.top]
    }
}
