use std::fmt;

use super::model::{NumericColumn, PatientDataset, PatientRecord};

// ---------------------------------------------------------------------------
// Filter selection: gender choice + inclusive age range
// ---------------------------------------------------------------------------

/// Gender dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenderChoice {
    #[default]
    All,
    Only(String),
}

impl GenderChoice {
    pub fn matches(&self, gender: &str) -> bool {
        match self {
            GenderChoice::All => true,
            GenderChoice::Only(g) => g == gender,
        }
    }
}

impl fmt::Display for GenderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderChoice::All => f.write_str("All"),
            GenderChoice::Only(g) => f.write_str(g),
        }
    }
}

/// Inclusive integer age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        AgeRange { min, max }
    }

    pub fn contains(&self, age: f64) -> bool {
        self.min as f64 <= age && age <= self.max as f64
    }

    /// Slider bounds for a dataset: floor of the youngest age to ceil of the
    /// oldest, so the full range always covers every row. Empty → (0, 0).
    pub fn bounds_of(dataset: &PatientDataset) -> Self {
        match dataset.column_range(NumericColumn::Age) {
            Some((lo, hi)) => AgeRange::new(lo.floor() as i64, hi.ceil() as i64),
            None => AgeRange::new(0, 0),
        }
    }

    /// A slider whose ends coincide shows a fixed value instead.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Clamp `self` into `bounds`. If the clamped ends would cross, both
    /// collapse onto the bound nearest the requested range.
    pub fn clamped_to(&self, bounds: AgeRange) -> Self {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(bounds.min, bounds.max);
        if min <= max {
            AgeRange::new(min, max)
        } else if self.max < bounds.min {
            AgeRange::new(bounds.min, bounds.min)
        } else {
            AgeRange::new(bounds.max, bounds.max)
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// Everything the sidebar controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub gender: GenderChoice,
    pub age: AgeRange,
}

impl FilterSelection {
    /// Row predicate: gender matches (or All) and age lies within the range.
    pub fn accepts(&self, record: &PatientRecord) -> bool {
        self.gender.matches(&record.gender) && self.age.contains(record.age)
    }
}

/// Dropdown entries: "All" followed by the dataset's genders in order.
pub fn gender_options(dataset: &PatientDataset) -> Vec<GenderChoice> {
    std::iter::once(GenderChoice::All)
        .chain(dataset.genders.iter().cloned().map(GenderChoice::Only))
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – row indices passing the selection
// ---------------------------------------------------------------------------

/// Rows of the dataset that pass the current selection, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the selected rows of `records` (raw or normalized; both share ordering).
    pub fn rows<'a>(&'a self, records: &'a [PatientRecord]) -> impl Iterator<Item = &'a PatientRecord> + 'a {
        self.indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Values of one numeric column over the selected rows.
    pub fn column(&self, dataset: &PatientDataset, column: NumericColumn) -> Vec<f64> {
        self.rows(&dataset.records).map(|r| column.value(r)).collect()
    }
}

/// Return the view of rows that satisfy `selection`.
pub fn apply_filter(dataset: &PatientDataset, selection: &FilterSelection) -> FilteredView {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.accepts(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}
