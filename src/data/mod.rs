//! Data module - CSV loading and the metric model

mod loader;
mod metric;

pub use loader::{DataLoader, DataPoint, LoaderError};
pub use metric::{Axis, AxisSelection, Metric, MetricError};
