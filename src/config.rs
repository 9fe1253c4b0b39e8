//! Dashboard configuration.
//!
//! An optional `walldash.json` next to the executable overrides where the
//! pipeline artifacts live; every field has a default matching the
//! upstream pipeline's export names.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "walldash.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory holding all pipeline artifacts.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Aligned slice summary table (translated).
    #[serde(default = "default_aligned_csv")]
    pub aligned_csv: String,

    /// Slice summary with eccentricity and angle columns.
    #[serde(default = "default_eccentricity_csv")]
    pub eccentricity_csv: String,

    /// Matrix transformation validation image. Optional at runtime.
    #[serde(default = "default_matrix_image")]
    pub matrix_image: String,

    /// Precomputed centroid drift plot document.
    #[serde(default = "default_centroid_plot")]
    pub centroid_plot: String,

    /// Precomputed eccentricity-vs-height plot document.
    #[serde(default = "default_eccentricity_plot")]
    pub eccentricity_plot: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            aligned_csv: default_aligned_csv(),
            eccentricity_csv: default_eccentricity_csv(),
            matrix_image: default_matrix_image(),
            centroid_plot: default_centroid_plot(),
            eccentricity_plot: default_eccentricity_plot(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_aligned_csv() -> String {
    "aligned_slice_summary_translated.csv".to_string()
}

fn default_eccentricity_csv() -> String {
    "aligned_slice_summary_with_eccentricity_and_angles.csv".to_string()
}

fn default_matrix_image() -> String {
    "Validate Matrix Transformation.png".to_string()
}

fn default_centroid_plot() -> String {
    "centroid_drift_vertical_spline.html".to_string()
}

fn default_eccentricity_plot() -> String {
    "eccentricity_vs_height.html".to_string()
}

impl DashboardConfig {
    /// Load `walldash.json` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn aligned_csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.aligned_csv)
    }

    pub fn eccentricity_csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.eccentricity_csv)
    }

    pub fn matrix_image_path(&self) -> PathBuf {
        self.data_dir.join(&self.matrix_image)
    }

    pub fn centroid_plot_path(&self) -> PathBuf {
        self.data_dir.join(&self.centroid_plot)
    }

    pub fn eccentricity_plot_path(&self) -> PathBuf {
        self.data_dir.join(&self.eccentricity_plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load_from(&dir.path().join("walldash.json")).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.aligned_csv, "aligned_slice_summary_translated.csv");
    }

    #[test]
    fn partial_config_keeps_defaults_for_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walldash.json");
        std::fs::write(&path, r#"{ "data_dir": "artifacts" }"#).unwrap();

        let cfg = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("artifacts"));
        assert_eq!(
            cfg.eccentricity_plot_path(),
            PathBuf::from("artifacts").join("eccentricity_vs_height.html")
        );
    }
}
