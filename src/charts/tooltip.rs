//! Hover tooltip content.

use crate::data::{AxisSelection, DataPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Index of the hovered data point
    pub index: usize,
    pub lines: Vec<String>,
}

impl Tooltip {
    /// Region name, then the Y value, then the X value.
    pub fn for_point(index: usize, point: &DataPoint, selection: AxisSelection) -> Self {
        let x = selection.x();
        let y = selection.y();
        Self {
            index,
            lines: vec![
                point.state.clone(),
                format!("{} {}", y.tooltip_label(), point.value(y)),
                format!("{} {}", x.tooltip_label(), point.value(x)),
            ],
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
