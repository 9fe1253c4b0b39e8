use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::loader::{self, DataError};
use crate::data::locate::locate_slices;
use crate::data::model::{EccentricitySchema, SliceArtifact, Table};
use crate::data::stats::{
    self, BottomReference, ColumnDescribe, ColumnExtrema, EccentricityExtremum,
};

/// Cosmetic stand-in for the upstream pipeline step. No work happens
/// during the delay; it only sequences before results become visible.
pub const PIPELINE_DELAY: Duration = Duration::from_secs(2);

pub const AREA_COLUMN: &str = "Area_mm2";
pub const HEIGHT_COLUMN: &str = "Height_mm";

// ---------------------------------------------------------------------------
// DashboardData – payload of a completed pipeline run
// ---------------------------------------------------------------------------

/// Everything a completed run exposes to the presentation layer. Source
/// tables are immutable for the session; derived panels are computed once
/// here, each as its own `Result` so a failure in one section never takes
/// down the others.
pub struct DashboardData {
    pub summary: Table,
    pub eccentricity: Table,
    pub ecc_schema: EccentricitySchema,
    pub slices: Vec<SliceArtifact>,
    /// None when the validation image is absent (non-fatal).
    pub matrix_image: Option<PathBuf>,
    pub centroid_plot: String,
    pub eccentricity_plot: String,

    // Derived panels, recomputed at load.
    pub summary_describe: Result<Vec<ColumnDescribe>, DataError>,
    pub area_extrema: Result<ColumnExtrema, DataError>,
    pub height_extrema: Result<ColumnExtrema, DataError>,
    pub ecc_extremum: Result<EccentricityExtremum, DataError>,
    pub bottom_ref: Result<BottomReference, DataError>,
}

impl DashboardData {
    /// Load every artifact the dashboard needs. Tables, slices and the two
    /// plot documents are required; the matrix image is optional.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let summary_path = config.aligned_csv_path();
        let summary = loader::load_table(&summary_path)
            .with_context(|| format!("loading {}", summary_path.display()))?;

        let ecc_path = config.eccentricity_csv_path();
        let eccentricity = loader::load_table(&ecc_path)
            .with_context(|| format!("loading {}", ecc_path.display()))?;

        let slices = locate_slices(&config.data_dir)
            .with_context(|| format!("scanning {}", config.data_dir.display()))?;

        let centroid_plot = loader::load_html(&config.centroid_plot_path())
            .context("loading centroid drift plot")?;
        let eccentricity_plot = loader::load_html(&config.eccentricity_plot_path())
            .context("loading eccentricity plot")?;

        let matrix_image = Some(config.matrix_image_path()).filter(|p| p.is_file());

        let ecc_schema = EccentricitySchema::resolve(&eccentricity);
        let summary_describe = stats::describe(&summary);
        let area_extrema = stats::column_extrema(&summary, AREA_COLUMN);
        let height_extrema = stats::column_extrema(&summary, HEIGHT_COLUMN);
        let ecc_extremum = stats::eccentricity_extremum(&eccentricity, &ecc_schema);
        let bottom_ref = stats::bottom_reference(&eccentricity, &ecc_schema);

        Ok(DashboardData {
            summary,
            eccentricity,
            ecc_schema,
            slices,
            matrix_image,
            centroid_plot,
            eccentricity_plot,
            summary_describe,
            area_extrema,
            height_extrema,
            ecc_extremum,
            bottom_ref,
        })
    }
}

// ---------------------------------------------------------------------------
// PipelineRun – explicit run state, no ambient session flag
// ---------------------------------------------------------------------------

/// State of the (simulated) pipeline run, passed explicitly into the
/// presentation layer instead of living in a global session flag.
pub enum PipelineRun {
    NotRun,
    Running { started: Instant },
    Ready(Box<DashboardData>),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A lazily-loaded slice preview, cached for the current selection.
pub struct SlicePreview {
    pub file_name: String,
    pub html: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub run: PipelineRun,

    /// Index into the located slice list.
    pub selected_slice: usize,
    pub slice_preview: Option<SlicePreview>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            run: PipelineRun::NotRun,
            selected_slice: 0,
            slice_preview: None,
            status_message: None,
        }
    }

    /// Trigger a run. Ignored while one is already in flight.
    pub fn start_pipeline(&mut self) {
        if !matches!(self.run, PipelineRun::Running { .. }) {
            self.run = PipelineRun::Running {
                started: Instant::now(),
            };
            self.status_message = None;
        }
    }

    /// Advance the simulated pipeline: once the cosmetic delay has
    /// elapsed, load all artifacts and move to Ready or Failed.
    pub fn poll_pipeline(&mut self) {
        let PipelineRun::Running { started } = &self.run else {
            return;
        };
        if started.elapsed() < PIPELINE_DELAY {
            return;
        }
        match DashboardData::load(&self.config) {
            Ok(data) => {
                log::info!(
                    "Pipeline completed: {} slices, {} summary rows",
                    data.slices.len(),
                    data.summary.n_rows()
                );
                self.selected_slice = 0;
                self.slice_preview = None;
                self.run = PipelineRun::Ready(Box::new(data));
                // Preload the bottom slice so the viewer is never blank.
                self.select_slice(0);
            }
            Err(e) => {
                log::error!("Pipeline run failed: {e:#}");
                self.run = PipelineRun::Failed(format!("{e:#}"));
            }
        }
    }

    /// Select a slice by index and read its HTML lazily, caching the
    /// content until the selection changes.
    pub fn select_slice(&mut self, idx: usize) {
        let PipelineRun::Ready(data) = &self.run else {
            return;
        };
        let Some(slice) = data.slices.get(idx) else {
            return;
        };
        if self.selected_slice == idx
            && self
                .slice_preview
                .as_ref()
                .is_some_and(|p| p.file_name == slice.file_name)
        {
            return;
        }

        self.selected_slice = idx;
        match loader::load_html(&slice.path) {
            Ok(html) => {
                self.slice_preview = Some(SlicePreview {
                    file_name: slice.file_name.clone(),
                    html,
                });
            }
            Err(e) => {
                log::error!("Failed to read slice {}: {e}", slice.file_name);
                self.slice_preview = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
