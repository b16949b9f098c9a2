use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell before column typing
// ---------------------------------------------------------------------------

/// A raw spreadsheet cell, as read by any of the loaders.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // Spreadsheets store integer IDs as floats; print them without ".0".
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// NumericColumn – the five numeric attributes of a patient
// ---------------------------------------------------------------------------

/// The numeric columns that are scaled, correlated and plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericColumn {
    Age,
    Hemoglobin,
    WbcCount,
    BlastCell,
    SurvivalTime,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::Age,
        NumericColumn::Hemoglobin,
        NumericColumn::WbcCount,
        NumericColumn::BlastCell,
        NumericColumn::SurvivalTime,
    ];

    /// Header of the column in the source spreadsheet.
    pub fn header(self) -> &'static str {
        match self {
            NumericColumn::Age => "Age (years)",
            NumericColumn::Hemoglobin => "Hemoglobin Level (g/dL)",
            NumericColumn::WbcCount => "WBC Count (10^3/µL)",
            NumericColumn::BlastCell => "Blast Cell %",
            NumericColumn::SurvivalTime => "Survival Time (months)",
        }
    }

    /// Compact label for crowded axes.
    pub fn short_label(self) -> &'static str {
        match self {
            NumericColumn::Age => "Age",
            NumericColumn::Hemoglobin => "Hemoglobin",
            NumericColumn::WbcCount => "WBC",
            NumericColumn::BlastCell => "Blast %",
            NumericColumn::SurvivalTime => "Survival",
        }
    }

    pub fn value(self, record: &PatientRecord) -> f64 {
        match self {
            NumericColumn::Age => record.age,
            NumericColumn::Hemoglobin => record.hemoglobin,
            NumericColumn::WbcCount => record.wbc_count,
            NumericColumn::BlastCell => record.blast_cell_pct,
            NumericColumn::SurvivalTime => record.survival_months,
        }
    }

    pub fn set(self, record: &mut PatientRecord, value: f64) {
        let slot = match self {
            NumericColumn::Age => &mut record.age,
            NumericColumn::Hemoglobin => &mut record.hemoglobin,
            NumericColumn::WbcCount => &mut record.wbc_count,
            NumericColumn::BlastCell => &mut record.blast_cell_pct,
            NumericColumn::SurvivalTime => &mut record.survival_months,
        };
        *slot = value;
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

pub const PATIENT_ID_HEADER: &str = "Patient ID";
pub const GENDER_HEADER: &str = "Gender";

// ---------------------------------------------------------------------------
// PatientRecord – one row of the sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub patient_id: String,
    pub gender: String,
    pub age: f64,
    pub hemoglobin: f64,
    pub wbc_count: f64,
    /// Blast Cell % with the percent sign stripped ("45%" → 45.0).
    pub blast_cell_pct: f64,
    pub survival_months: f64,
}

// ---------------------------------------------------------------------------
// PatientDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All patient records in sheet order, plus the distinct genders.
#[derive(Debug, Clone, Default)]
pub struct PatientDataset {
    pub records: Vec<PatientRecord>,
    /// Distinct genders in order of first appearance.
    pub genders: Vec<String>,
}

impl PatientDataset {
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        let mut genders: Vec<String> = Vec::new();
        for rec in &records {
            if !genders.contains(&rec.gender) {
                genders.push(rec.gender.clone());
            }
        }
        PatientDataset { records, genders }
    }

    /// Number of patients.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum of a numeric column, `None` for an empty dataset.
    pub fn column_range(&self, column: NumericColumn) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| column.value(r))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn patient(id: &str, gender: &str, age: f64) -> PatientRecord {
        PatientRecord {
            patient_id: id.to_string(),
            gender: gender.to_string(),
            age,
            hemoglobin: 12.0,
            wbc_count: 8.0,
            blast_cell_pct: 30.0,
            survival_months: 24.0,
        }
    }

    #[test]
    fn genders_keep_first_appearance_order() {
        let ds = PatientDataset::from_records(vec![
            patient("P1", "Male", 40.0),
            patient("P2", "Female", 50.0),
            patient("P3", "Male", 60.0),
        ]);
        assert_eq!(ds.genders, vec!["Male".to_string(), "Female".to_string()]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn column_range_spans_all_rows() {
        let ds = PatientDataset::from_records(vec![
            patient("P1", "Male", 40.0),
            patient("P2", "Female", 18.0),
            patient("P3", "Male", 77.0),
        ]);
        assert_eq!(ds.column_range(NumericColumn::Age), Some((18.0, 77.0)));
        assert_eq!(PatientDataset::default().column_range(NumericColumn::Age), None);
    }

    #[test]
    fn integer_cells_display_without_fraction() {
        assert_eq!(CellValue::Number(101.0).to_string(), "101");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        assert!(CellValue::Text("  ".into()).is_empty());
    }
}
