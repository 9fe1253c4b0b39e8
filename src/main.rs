mod app;
mod config;
mod data;
mod state;
mod ui;

use app::WallDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Bad {}: {e:#}; using defaults", config::CONFIG_FILE);
            DashboardConfig::default()
        }
    };
    log::info!("Serving artifacts from {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "3DCP Wall Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the validation png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(WallDashApp::new(config)))
        }),
    )
}
