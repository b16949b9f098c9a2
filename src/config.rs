use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::AgeRange;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Startup settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup.
    pub data_path: PathBuf,
    /// Sheet read from workbook formats.
    pub sheet_name: String,
    /// Initial age slider selection, clamped into the dataset's bounds.
    pub default_age_range: [i64; 2],
    pub histogram_bins: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Patient Dataset.xlsx"),
            sheet_name: "Table 1".to_string(),
            default_age_range: [20, 70],
            histogram_bins: 10,
            window_size: [1280.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists; otherwise fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn default_age_range(&self) -> AgeRange {
        let [lo, hi] = self.default_age_range;
        AgeRange::new(lo.min(hi), lo.max(hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("patient-dashboard-no-such-config.json");
        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.default_age_range(), AgeRange::new(20, 70));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = std::env::temp_dir().join(format!("patient-dashboard-{}-config.json", std::process::id()));
        std::fs::write(&path, r#"{ "data_path": "patients.csv", "default_age_range": [70, 30] }"#).unwrap();
        let config = DashboardConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.data_path, PathBuf::from("patients.csv"));
        assert_eq!(config.sheet_name, "Table 1");
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.default_age_range(), AgeRange::new(30, 70));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("patient-dashboard-{}-bad.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = DashboardConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
