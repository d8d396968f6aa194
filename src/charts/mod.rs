//! Charts module - Scales, scene layout, animation and rendering

mod layout;
mod plotter;
mod renderer;
pub mod scale;
pub mod scene;
mod tooltip;
mod transition;

pub use layout::{ChartDimensions, Viewport};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use scale::{LinearScale, Scales};
pub use scene::{build_scene, AxisLabelMark, MarkStyle, Scene, TickMark};
pub use tooltip::Tooltip;
pub use transition::Transition;
