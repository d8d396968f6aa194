//! Health Scatter Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{StaticChartRenderer, Viewport};
use crate::config::ChartConfig;
use crate::data::{DataLoader, DataPoint, LoaderError, Metric};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        path: PathBuf,
        points: Vec<DataPoint>,
    },
    Error {
        path: PathBuf,
        error: LoaderError,
    },
}

/// Main application window.
pub struct ScatterApp {
    loader: DataLoader,
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ScatterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            config,
        };
        let data_path = app.config.data_path.clone();
        app.start_loading(data_path);
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    fn handle_reload_csv(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(path) = self.loader.get_file_path().cloned() {
            self.start_loading(path);
        }
    }

    /// Read the CSV in a background thread; results arrive through `load_rx`.
    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.row_count = 0;
        self.control_panel.export_enabled = false;
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        log::info!("Loading data from {}", path.display());

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let result = match DataLoader::read_points(&path) {
                Ok(points) => LoadResult::Complete { path, points },
                Err(error) => LoadResult::Error { path, error },
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self, ctx: &egui::Context) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { path, points } => {
                        let screen = ctx.screen_rect().size();
                        let viewport = Viewport::new(screen.x as f64, screen.y as f64);

                        self.chart_viewer
                            .set_data(points.clone(), viewport, self.config.clone());
                        self.loader.set_points(path, points);
                        let row_count = self.loader.get_row_count();

                        log::info!("Loaded {} rows", row_count);
                        self.control_panel.row_count = row_count;
                        self.control_panel.export_enabled = true;
                        self.control_panel
                            .set_status(&format!("Loaded {} rows", row_count));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error { path, error } => {
                        log::error!("Failed to load data from {}: {}", path.display(), error);
                        self.chart_viewer.clear();
                        let status = match error {
                            LoaderError::CsvError(_) => "Error: could not read CSV".to_string(),
                            other => format!("Error: {}", other),
                        };
                        self.control_panel.set_status(&status);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn handle_select_metric(&mut self, metric: Metric, now: f64) {
        let Some(controller) = self.chart_viewer.controller.as_mut() else {
            return;
        };
        if let Err(e) = controller.select_metric(metric.axis(), metric, now) {
            log::warn!("Could not select {}: {}", metric, e);
        }
    }

    /// Write the settled chart to an SVG file
    fn handle_export_svg(&mut self) {
        let Some(controller) = self.chart_viewer.controller.as_ref() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name("health_scatter.svg")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        let scene = controller.target_scene();
        match StaticChartRenderer::save_svg(&scene, &output_path) {
            Ok(()) => {
                log::info!("Exported chart to {}", output_path.display());
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        log::warn!("Could not open {}: {}", output_path.display(), e);
                    }
                }
            }
            Err(e) => {
                log::error!("SVG export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results(ctx);

        if self.is_loading {
            ctx.request_repaint();
        }

        let now = ctx.input(|i| i.time);

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let selection = self
                        .chart_viewer
                        .controller
                        .as_ref()
                        .map(|c| c.selection());
                    let action = self.control_panel.show(ui, selection);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ReloadCsv => self.handle_reload_csv(),
                        ControlPanelAction::SelectMetric(metric) => {
                            self.handle_select_metric(metric, now);
                            ctx.request_repaint();
                        }
                        ControlPanelAction::ExportSvg => self.handle_export_svg(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.chart_viewer.show(ctx, ui);
            });
        });
    }
}
