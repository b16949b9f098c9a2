use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{AgeRange, FilterSelection, FilteredView, GenderChoice, apply_filter};
use crate::data::loader::load_file;
use crate::data::model::{GENDER_HEADER, NumericColumn, PatientDataset};
use crate::data::normalize::{NormalizedDataset, normalize};
use crate::data::stats::{CorrelationMatrix, HistogramBin, correlation_matrix, histogram};

// ---------------------------------------------------------------------------
// 3D view orientation
// ---------------------------------------------------------------------------

/// Yaw/pitch (radians) of the 3D scatter, changed by dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.35,
        }
    }
}

impl OrbitCamera {
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * 0.01;
        self.pitch = (self.pitch + dy * 0.01).clamp(-1.5, 1.5);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// File the dataset was read from.
    pub source: PathBuf,

    pub dataset: PatientDataset,

    /// Min-max scaled copy, fitted on the unfiltered dataset.
    pub normalized: NormalizedDataset,

    /// Age slider limits derived from the dataset.
    pub age_bounds: AgeRange,

    pub selection: FilterSelection,

    /// Rows passing the current selection (cached).
    pub view: FilteredView,

    /// Hemoglobin histogram of the current view.
    pub hemoglobin_bins: Vec<HistogramBin>,

    /// Correlation of the numeric columns over the current view.
    pub correlation: CorrelationMatrix,

    /// Gender → colour, fixed per dataset.
    pub color_map: ColorMap,

    /// Show normalized values in the data table.
    pub minmax_scaling: bool,

    pub camera: OrbitCamera,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, source: PathBuf, dataset: PatientDataset) -> Self {
        let age = config.default_age_range();
        let mut state = Self {
            config,
            source: PathBuf::new(),
            dataset: PatientDataset::default(),
            normalized: NormalizedDataset::default(),
            age_bounds: AgeRange::new(0, 0),
            selection: FilterSelection {
                gender: GenderChoice::All,
                age,
            },
            view: FilteredView::default(),
            hemoglobin_bins: Vec::new(),
            correlation: CorrelationMatrix::default(),
            color_map: ColorMap::default(),
            minmax_scaling: false,
            camera: OrbitCamera::default(),
            status_message: None,
        };
        state.set_dataset(source, dataset);
        state
    }

    /// Ingest a newly loaded dataset: scale it, reset filters and colours.
    pub fn set_dataset(&mut self, source: PathBuf, dataset: PatientDataset) {
        self.normalized = normalize(&dataset, &NumericColumn::ALL);
        self.age_bounds = AgeRange::bounds_of(&dataset);

        let wanted = self.config.default_age_range();
        let age = wanted.clamped_to(self.age_bounds);
        if age != wanted {
            log::warn!(
                "Default age range {wanted} lies outside the data ({}); using {age}",
                self.age_bounds
            );
        }
        self.selection = FilterSelection {
            gender: GenderChoice::All,
            age,
        };
        self.color_map = ColorMap::new(GENDER_HEADER, &dataset.genders);

        log::info!(
            "Dataset ready: {} patients, age bounds {}, genders {:?}",
            dataset.len(),
            self.age_bounds,
            dataset.genders
        );

        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the view and every derived chart input.
    pub fn refilter(&mut self) {
        self.view = apply_filter(&self.dataset, &self.selection);
        self.hemoglobin_bins = histogram(
            &self.view.column(&self.dataset, NumericColumn::Hemoglobin),
            self.config.histogram_bins,
        );
        self.correlation = correlation_matrix(&self.dataset, &self.view, &NumericColumn::ALL);
        log::debug!(
            "Filter gender={} age={} → {} of {} rows",
            self.selection.gender,
            self.selection.age,
            self.view.len(),
            self.dataset.len()
        );
    }

    pub fn set_gender(&mut self, gender: GenderChoice) {
        if self.selection.gender != gender {
            self.selection.gender = gender;
            self.refilter();
        }
    }

    /// Move the lower age handle; the upper one is pushed along if needed.
    pub fn set_age_min(&mut self, min: i64) {
        let min = min.clamp(self.age_bounds.min, self.age_bounds.max);
        let max = self.selection.age.max.max(min);
        self.set_age(AgeRange::new(min, max));
    }

    /// Move the upper age handle; the lower one is pushed along if needed.
    pub fn set_age_max(&mut self, max: i64) {
        let max = max.clamp(self.age_bounds.min, self.age_bounds.max);
        let min = self.selection.age.min.min(max);
        self.set_age(AgeRange::new(min, max));
    }

    fn set_age(&mut self, age: AgeRange) {
        if self.selection.age != age {
            self.selection.age = age;
            self.refilter();
        }
    }

    /// Replace the dataset with another file. On failure the current data stays.
    pub fn open_file(&mut self, path: &Path) {
        match load_file(path, &self.config.sheet_name) {
            Ok(dataset) => self.set_dataset(path.to_path_buf(), dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::patient;

    fn state() -> AppState {
        let mut records = vec![
            patient("P1", "Male", 15.0),
            patient("P2", "Female", 25.0),
            patient("P3", "Male", 70.0),
            patient("P4", "Female", 80.0),
        ];
        for (i, rec) in records.iter_mut().enumerate() {
            rec.hemoglobin = [9.0, 10.5, 12.0, 14.0][i];
        }
        AppState::new(
            DashboardConfig::default(),
            PathBuf::from("fixture.csv"),
            PatientDataset::from_records(records),
        )
    }

    #[test]
    fn starts_with_default_selection() {
        let s = state();
        assert_eq!(s.age_bounds, AgeRange::new(15, 80));
        assert_eq!(s.selection.age, AgeRange::new(20, 70));
        assert_eq!(s.selection.gender, GenderChoice::All);
        assert_eq!(s.view.indices, vec![1, 2]);
        assert_eq!(s.normalized.records.len(), 4);
    }

    #[test]
    fn derived_charts_follow_the_filter() {
        let mut s = state();
        s.set_age_min(15);
        s.set_age_max(80);
        assert_eq!(s.view.len(), 4);
        assert_eq!(s.hemoglobin_bins.iter().map(|b| b.count).sum::<usize>(), 4);

        s.set_gender(GenderChoice::Only("Female".into()));
        assert_eq!(s.view.indices, vec![1, 3]);
        assert_eq!(s.hemoglobin_bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!((s.correlation.get(0, 1).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn handles_never_cross() {
        let mut s = state();
        s.set_age_min(75);
        assert_eq!(s.selection.age, AgeRange::new(75, 75));
        s.set_age_max(30);
        assert_eq!(s.selection.age, AgeRange::new(30, 30));
        s.set_age_max(500);
        assert_eq!(s.selection.age, AgeRange::new(30, 80));
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let mut s = state();
        s.set_gender(GenderChoice::Only("Unknown".into()));
        assert!(s.view.is_empty());
        assert!(s.hemoglobin_bins.is_empty());
        assert_eq!(s.correlation.get(0, 0), None);
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut s = state();
        s.open_file(Path::new("/definitely/not/here.xlsx"));
        assert_eq!(s.dataset.len(), 4);
        assert_eq!(s.source, PathBuf::from("fixture.csv"));
        assert!(s.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
