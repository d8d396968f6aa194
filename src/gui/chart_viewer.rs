//! Chart Viewer Widget
//! Central panel hosting the interactive scatter chart.
//! Forwards clicks, hover and window resizes to the chart controller.

use crate::charts::{ChartPlotter, Viewport};
use crate::config::ChartConfig;
use crate::controller::{ChartController, ChartEvent};
use crate::data::DataPoint;
use egui::{CursorIcon, RichText, Sense, Vec2};

/// Displays one chart and turns egui input into chart events.
#[derive(Default)]
pub struct ChartViewer {
    pub controller: Option<ChartController>,
    last_viewport: Option<Viewport>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the chart; the viewer shows an empty state until new data arrives.
    pub fn clear(&mut self) {
        self.controller = None;
    }

    /// Build a fresh chart for the given rows.
    pub fn set_data(&mut self, points: Vec<DataPoint>, viewport: Viewport, config: ChartConfig) {
        self.controller = Some(ChartController::initialize(points, viewport, config));
        self.last_viewport = Some(viewport);
    }

    fn dispatch(controller: &mut ChartController, event: ChartEvent, now: f64) {
        if let Err(e) = controller.handle(event, now) {
            log::warn!("Ignored chart event {:?}: {}", event, e);
        }
    }

    /// Draw the chart, handling input for this frame
    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let Some(controller) = self.controller.as_mut() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let now = ctx.input(|i| i.time);

        // A changed window size throws the old chart away
        let screen = ctx.screen_rect().size();
        let viewport = Viewport::new(screen.x as f64, screen.y as f64);
        if self.last_viewport != Some(viewport) {
            Self::dispatch(controller, ChartEvent::Resized(viewport), now);
            self.last_viewport = Some(viewport);
        }

        let dims = *controller.dimensions();
        let (response, painter) = ui.allocate_painter(
            Vec2::new(dims.svg_width as f32, dims.svg_height as f32),
            Sense::hover(),
        );
        painter.rect_filled(response.rect, 0.0, ui.visuals().extreme_bg_color);
        let origin = response.rect.min + Vec2::new(dims.margin.left as f32, dims.margin.top as f32);

        let pointer = response
            .hover_pos()
            .map(|p| p - response.rect.min)
            .map(|v| dims.to_chart([v.x as f64, v.y as f64]));
        Self::dispatch(controller, ChartEvent::PointerMoved(pointer), now);

        let scene = controller.scene(now);
        let hitboxes = ChartPlotter::paint_scene(&painter, origin, &scene, ui.visuals());

        for hitbox in hitboxes {
            let label = ui
                .interact(
                    hitbox.rect,
                    response.id.with(hitbox.metric.column()),
                    Sense::click(),
                )
                .on_hover_cursor(CursorIcon::PointingHand);
            if label.clicked() {
                Self::dispatch(controller, ChartEvent::LabelClicked(hitbox.metric), now);
            }
        }

        if let (Some(tooltip), Some(pos)) = (controller.tooltip(), response.hover_pos()) {
            ChartPlotter::paint_tooltip(&painter, pos, &tooltip);
        }

        if controller.is_animating(now) {
            ctx.request_repaint();
        }
    }
}
