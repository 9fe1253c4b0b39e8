use std::time::Duration;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, PipelineRun};
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WallDashApp {
    pub state: AppState,
}

impl WallDashApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for WallDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the simulated pipeline; keep repainting while it runs so
        // the delay elapses without user input.
        self.state.poll_pipeline();
        if matches!(self.state.run, PipelineRun::Running { .. }) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: pipeline trigger and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: slice selection ----
        egui::SidePanel::left("slice_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            sections::dashboard(ui, &mut self.state);
        });
    }
}
