use super::model::{NumericColumn, PatientDataset, PatientRecord};

// ---------------------------------------------------------------------------
// Min-max scaling
// ---------------------------------------------------------------------------

/// Observed range of one column at fit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Range of `values`; `None` when there are none.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        Some(rest.iter().fold(
            ColumnRange {
                min: first,
                max: first,
            },
            |acc, &v| ColumnRange {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        ))
    }

    /// Zero width relative to the magnitude of the values, or never observed.
    pub fn is_flat(&self) -> bool {
        let range = self.max - self.min;
        !range.is_finite() || range <= f64::EPSILON * self.min.abs().max(self.max.abs())
    }

    /// Map `v` into [0,1]. A flat range maps to 0.
    pub fn scale(&self, v: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            (v - self.min) / (self.max - self.min)
        }
    }
}

/// Per-column min/max fitted once on the unfiltered dataset.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    ranges: Vec<(NumericColumn, ColumnRange)>,
}

impl MinMaxScaler {
    pub fn fit(records: &[PatientRecord], columns: &[NumericColumn]) -> Self {
        let ranges = columns
            .iter()
            .map(|&col| {
                let range = records.iter().map(|r| col.value(r)).fold(
                    ColumnRange {
                        min: f64::INFINITY,
                        max: f64::NEG_INFINITY,
                    },
                    |acc, v| ColumnRange {
                        min: acc.min.min(v),
                        max: acc.max.max(v),
                    },
                );
                (col, range)
            })
            .collect();
        MinMaxScaler { ranges }
    }

    pub fn range(&self, column: NumericColumn) -> Option<ColumnRange> {
        self.ranges
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, range)| *range)
    }

    /// Rescale the fitted columns of a copy of `records`; other fields are untouched.
    pub fn transform(&self, records: &[PatientRecord]) -> Vec<PatientRecord> {
        records
            .iter()
            .map(|rec| {
                let mut scaled = rec.clone();
                for (col, range) in &self.ranges {
                    col.set(&mut scaled, range.scale(col.value(rec)));
                }
                scaled
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// NormalizedDataset
// ---------------------------------------------------------------------------

/// A scaled copy of the dataset: same rows, same order.
#[derive(Debug, Clone, Default)]
pub struct NormalizedDataset {
    pub records: Vec<PatientRecord>,
    pub scaler: MinMaxScaler,
}

/// Fit on the full dataset and rescale `columns` into [0,1].
pub fn normalize(dataset: &PatientDataset, columns: &[NumericColumn]) -> NormalizedDataset {
    let scaler = MinMaxScaler::fit(&dataset.records, columns);
    NormalizedDataset {
        records: scaler.transform(&dataset.records),
        scaler,
    }
}
