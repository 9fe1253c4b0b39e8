use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, PipelineRun};

// ---------------------------------------------------------------------------
// Top bar – pipeline trigger and status
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.heading("3DCP Wall Dashboard");
        ui.separator();

        let running = matches!(state.run, PipelineRun::Running { .. });
        if ui
            .add_enabled(!running, egui::Button::new("Run Pipeline"))
            .clicked()
        {
            state.start_pipeline();
        }

        ui.separator();

        match &state.run {
            PipelineRun::NotRun => {
                ui.label("Press Run Pipeline to view the results.");
            }
            PipelineRun::Running { .. } => {
                ui.spinner();
                ui.label("Processing data…");
            }
            PipelineRun::Ready(data) => {
                ui.label(format!(
                    "Pipeline completed: {} slices, {} summary rows",
                    data.slices.len(),
                    data.summary.n_rows()
                ));
            }
            PipelineRun::Failed(msg) => {
                ui.label(RichText::new(format!("Pipeline failed: {msg}")).color(Color32::RED));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – slice selection
// ---------------------------------------------------------------------------

/// Render the slice list. Selecting an entry loads its HTML lazily.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Slices");
    ui.separator();

    let PipelineRun::Ready(data) = &state.run else {
        ui.label("No results yet.");
        return;
    };

    if data.slices.is_empty() {
        ui.label("No slice HTMLs found.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, slice) in data.slices.iter().enumerate() {
                let selected = idx == state.selected_slice;
                if ui.selectable_label(selected, &slice.file_name).clicked() {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        state.select_slice(idx);
    }
}
