//! Metric Module
//! The six plottable columns, the axis each one belongs to, and the active pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("Unknown metric: {0}")]
    Unknown(String),
}

/// Chart axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// One named numeric column usable as an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Poverty,
    Age,
    Income,
    Healthcare,
    Smokes,
    Obesity,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Poverty,
        Metric::Age,
        Metric::Income,
        Metric::Healthcare,
        Metric::Smokes,
        Metric::Obesity,
    ];

    /// Metrics selectable on the X axis, in label order.
    pub const X_METRICS: [Metric; 3] = [Metric::Poverty, Metric::Age, Metric::Income];

    /// Metrics selectable on the Y axis, in label order.
    pub const Y_METRICS: [Metric; 3] = [Metric::Healthcare, Metric::Smokes, Metric::Obesity];

    /// CSV column name.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Poverty => "poverty",
            Metric::Age => "age",
            Metric::Income => "income",
            Metric::Healthcare => "healthcare",
            Metric::Smokes => "smokes",
            Metric::Obesity => "obesity",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Metric::Poverty | Metric::Age | Metric::Income => Axis::X,
            Metric::Healthcare | Metric::Smokes | Metric::Obesity => Axis::Y,
        }
    }

    /// Text of the clickable axis label.
    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Poverty => "Poverty (%)",
            Metric::Age => "Age (Median)",
            Metric::Income => "Household Income (Median)",
            Metric::Healthcare => "Lacks Healthcare (%)",
            Metric::Smokes => "Smokes (%)",
            Metric::Obesity => "Obese (%)",
        }
    }

    /// Prefix used in the hover tooltip.
    pub fn tooltip_label(self) -> &'static str {
        match self {
            Metric::Poverty => "Percent in Poverty:",
            Metric::Age => "Median Age:",
            Metric::Income => "Median Household Income:",
            Metric::Healthcare => "Percent Lacking Healthcare:",
            Metric::Smokes => "Percent that Smoke:",
            Metric::Obesity => "Percent Obese:",
        }
    }

    /// Metrics sharing an axis, in label order.
    pub fn for_axis(axis: Axis) -> [Metric; 3] {
        match axis {
            Axis::X => Self::X_METRICS,
            Axis::Y => Self::Y_METRICS,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| MetricError::Unknown(s.to_string()))
    }
}

/// Currently chosen X and Y metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    x: Metric,
    y: Metric,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: Metric::Poverty,
            y: Metric::Healthcare,
        }
    }
}

impl AxisSelection {
    /// Build a selection, falling back to the default for a metric on the wrong axis.
    pub fn new(x: Metric, y: Metric) -> Self {
        let default = Self::default();
        Self {
            x: if x.axis() == Axis::X { x } else { default.x },
            y: if y.axis() == Axis::Y { y } else { default.y },
        }
    }

    pub fn x(&self) -> Metric {
        self.x
    }

    pub fn y(&self) -> Metric {
        self.y
    }

    pub fn get(&self, axis: Axis) -> Metric {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn is_active(&self, metric: Metric) -> bool {
        self.get(metric.axis()) == metric
    }

    /// Make `metric` active on its own axis.
    /// Returns false when it already was.
    pub fn select(&mut self, metric: Metric) -> bool {
        let slot = match metric.axis() {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        if *slot == metric {
            return false;
        }
        *slot = metric;
        true
    }
}
