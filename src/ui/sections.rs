use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{self, DataError};
use crate::data::model::Table;
use crate::state::{AppState, DashboardData, PipelineRun, SlicePreview};

// ---------------------------------------------------------------------------
// Central panel – dashboard sections
// ---------------------------------------------------------------------------

/// Render the whole dashboard. Each section is independent: a derived
/// panel that failed shows its own error while the rest keep rendering.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let data = match &state.run {
        PipelineRun::Ready(data) => data,
        PipelineRun::NotRun => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Press Run Pipeline to view the results with the configured data.");
            });
            return;
        }
        PipelineRun::Running { .. } => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
            return;
        }
        PipelineRun::Failed(msg) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(format!("Pipeline failed: {msg}")).color(Color32::RED));
            });
            return;
        }
    };

    let mut status = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            status = slice_section(ui, data, state.slice_preview.as_ref()).or(status.take());
            ui.separator();
            matrix_section(ui, data);
            ui.separator();
            status = summary_section(ui, data).or(status.take());
            ui.separator();
            status = eccentricity_section(ui, data).or(status.take());
            ui.separator();
            status = plots_section(ui, data).or(status.take());
        });

    if status.is_some() {
        state.status_message = status;
    }
}

// ---------------------------------------------------------------------------
// Slice visualization
// ---------------------------------------------------------------------------

fn slice_section(
    ui: &mut Ui,
    data: &DashboardData,
    preview: Option<&SlicePreview>,
) -> Option<String> {
    ui.heading("Sample Individual Slice Visualizations (HTML)");

    if data.slices.is_empty() {
        ui.label("No slice HTMLs found.");
        return None;
    }

    let Some(preview) = preview else {
        ui.label("Select a slice in the left panel to view it.");
        return None;
    };
    let slice = data
        .slices
        .iter()
        .find(|s| s.file_name == preview.file_name)?;

    ui.strong(slice.title());
    html_preview(ui, "slice_preview", &preview.html);

    let mut status = None;
    if ui
        .button(format!("Download {}", preview.file_name))
        .clicked()
    {
        // Written byte-for-byte as loaded from disk.
        status = save_text("Save slice HTML", &preview.file_name, &preview.html);
    }
    status
}

// ---------------------------------------------------------------------------
// Matrix validation image
// ---------------------------------------------------------------------------

fn matrix_section(ui: &mut Ui, data: &DashboardData) {
    ui.heading("Matrix Validation: PCA Rotation and XY Translation");

    match &data.matrix_image {
        Some(path) => {
            ui.add(
                egui::Image::from_uri(format!("file://{}", path.display()))
                    .max_width(900.0),
            );
            ui.small("Matrix Transformation Validation");
        }
        None => {
            ui.label("No matrix validation image found.");
        }
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

fn summary_section(ui: &mut Ui, data: &DashboardData) -> Option<String> {
    ui.heading("Summary Statistics (Aligned Slice Summary - Translated)");

    ui.strong("Full Data Table");
    table_grid(ui, "summary_table", &data.summary);
    ui.add_space(8.0);

    ui.strong("Descriptive Statistics");
    match &data.summary_describe {
        Ok(described) => describe_grid(ui, described),
        Err(e) => error_label(ui, e),
    }
    ui.add_space(8.0);

    ui.strong("Max, Min, Mean, Variance, Std, Height");
    match &data.area_extrema {
        Ok(area) => {
            ui.label(format!("Max Area (mm2): {}", area.max));
            ui.label(format!("Min Area (mm2): {}", area.min));
            ui.label(format!("Mean Area (mm2): {}", area.mean));
            ui.label(format!("Area Variance (mm2): {}", area.variance));
            ui.label(format!("Area Standard Deviation (mm2): {}", area.std));
        }
        Err(e) => error_label(ui, e),
    }
    match &data.height_extrema {
        Ok(height) => {
            ui.label(format!("Max Height (mm): {}", height.max));
            ui.label(format!("Min Height (mm): {}", height.min));
        }
        Err(e) => error_label(ui, e),
    }
    ui.add_space(8.0);

    let mut status = None;
    if ui.button("Download aligned summary CSV").clicked() {
        status = save_table(
            "Save aligned summary CSV",
            "aligned_slice_summary_translated.csv",
            &data.summary,
        );
    }
    status
}

// ---------------------------------------------------------------------------
// Eccentricity and angle
// ---------------------------------------------------------------------------

fn eccentricity_section(ui: &mut Ui, data: &DashboardData) -> Option<String> {
    ui.heading("Eccentricity and Angle Info & Table");

    ui.strong("Bottom Reference and Max Eccentricity");
    match (&data.bottom_ref, &data.ecc_extremum) {
        (Ok(bottom), Ok(extremum)) => {
            ui.label(format!(
                "Bottom reference: Z = {:.2} mm, X = {:.3} mm",
                bottom.height, bottom.centroid_x
            ));
            ui.label(format!(
                "Max eccentricity from bottom centroid: {:.2} mm at Z = {:.2} mm",
                extremum.max_eccentricity, extremum.height_at_max
            ));
            match extremum.angle_at_max {
                Some(angle) => {
                    ui.label(format!("Corresponding angle: {angle:.6} degrees"));
                }
                None => {
                    ui.label("Corresponding angle: not available (no angle column)");
                }
            }
        }
        (bottom, extremum) => {
            if let Err(e) = bottom {
                error_label(ui, e);
            }
            if let Err(e) = extremum {
                error_label(ui, e);
            }
        }
    }
    ui.add_space(8.0);

    ui.strong("Full Eccentricity and Angle CSV Table");
    table_grid(ui, "ecc_table", &data.eccentricity);
    ui.add_space(8.0);

    let mut status = None;
    if ui.button("Download eccentricity and angle CSV").clicked() {
        status = save_table(
            "Save eccentricity and angle CSV",
            "eccentricity_and_angle.csv",
            &data.eccentricity,
        );
    }
    status
}

// ---------------------------------------------------------------------------
// Interactive plot documents
// ---------------------------------------------------------------------------

fn plots_section(ui: &mut Ui, data: &DashboardData) -> Option<String> {
    ui.heading("Interactive HTML Plots");
    ui.label("Precomputed interactive plots are standalone HTML documents. Save one and open it in a browser.");

    let mut status = None;

    ui.strong("Centroid Drift (Interactive HTML)");
    html_preview(ui, "centroid_plot", &data.centroid_plot);
    if ui.button("Save centroid drift plot…").clicked() {
        status = save_text(
            "Save centroid drift plot",
            "centroid_drift_vertical_spline.html",
            &data.centroid_plot,
        );
    }
    ui.add_space(8.0);

    ui.strong("Eccentricity vs Height (Interactive HTML)");
    html_preview(ui, "ecc_plot", &data.eccentricity_plot);
    if ui.button("Save eccentricity plot…").clicked() {
        status = save_text(
            "Save eccentricity plot",
            "eccentricity_vs_height.html",
            &data.eccentricity_plot,
        )
        .or(status);
    }

    status
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Render a loaded table as a striped grid with its own scroll region.
fn table_grid(ui: &mut Ui, id: &str, table: &Table) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(280.0)
            .columns(Column::auto().at_least(70.0), table.n_columns())
            .header(20.0, |mut header| {
                for name in table.column_names() {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.n_rows(), |mut row| {
                    let r = row.index();
                    for c in 0..table.n_columns() {
                        row.col(|ui| {
                            let text = table
                                .column_at(c)
                                .and_then(|values| values.get(r))
                                .map(|v| v.to_string())
                                .unwrap_or_default();
                            ui.label(text);
                        });
                    }
                });
            });
    });
}

/// Pandas-describe style grid: one row per numeric column.
fn describe_grid(ui: &mut Ui, described: &[crate::data::stats::ColumnDescribe]) {
    const HEADERS: [&str; 9] = [
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];
    ui.push_id("describe_grid", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(220.0)
            .columns(Column::auto().at_least(60.0), HEADERS.len())
            .header(20.0, |mut header| {
                for h in HEADERS {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, described.len(), |mut row| {
                    let d = &described[row.index()];
                    let cells = [
                        d.column.clone(),
                        d.count.to_string(),
                        format!("{:.6}", d.mean),
                        format!("{:.6}", d.std),
                        format!("{:.6}", d.min),
                        format!("{:.6}", d.q25),
                        format!("{:.6}", d.median),
                        format!("{:.6}", d.q75),
                        format!("{:.6}", d.max),
                    ];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Read-only source view of an HTML document, truncated for layout cost.
fn html_preview(ui: &mut Ui, id: &str, html: &str) {
    const PREVIEW_LIMIT: usize = 4000;
    let truncated = if html.len() > PREVIEW_LIMIT {
        let mut end = PREVIEW_LIMIT;
        while !html.is_char_boundary(end) {
            end -= 1;
        }
        &html[..end]
    } else {
        html
    };

    ui.push_id(id, |ui: &mut Ui| {
        egui::CollapsingHeader::new(format!("Document source ({} bytes)", html.len()))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ScrollArea::vertical().max_height(220.0).show(ui, |ui: &mut Ui| {
                    let mut text = truncated;
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
    });
}

fn error_label(ui: &mut Ui, e: &DataError) {
    ui.label(RichText::new(format!("Unavailable: {e}")).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// Download actions
// ---------------------------------------------------------------------------

fn save_text(title: &str, default_name: &str, contents: &str) -> Option<String> {
    let path = rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(default_name)
        .save_file()?;

    match std::fs::write(&path, contents.as_bytes()) {
        Ok(()) => {
            log::info!("Saved {}", path.display());
            Some(format!("Saved {}", path.display()))
        }
        Err(e) => {
            log::error!("Failed to save {}: {e}", path.display());
            Some(format!("Error: failed to save {}: {e}", path.display()))
        }
    }
}

fn save_table(title: &str, default_name: &str, table: &Table) -> Option<String> {
    match loader::table_to_csv(table) {
        Ok(csv_text) => save_text(title, default_name, &csv_text),
        Err(e) => {
            log::error!("Failed to serialize table: {e}");
            Some(format!("Error: failed to serialize table: {e}"))
        }
    }
}
