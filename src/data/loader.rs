use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{LoadError, ParseError, Result};
use super::model::{
    CellValue, GENDER_HEADER, NumericColumn, PATIENT_ID_HEADER, PatientDataset, PatientRecord,
};

// ---------------------------------------------------------------------------
// RawTable – what every format is reduced to before typing
// ---------------------------------------------------------------------------

/// A header row plus untyped data rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the patient dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – the sheet named `sheet`
/// * `.csv`     – header row plus one patient per line
/// * `.parquet` – one column per attribute
/// * `.json`    – `[{ "Patient ID": ..., "Gender": ..., ... }, ...]`
///
/// `sheet` is ignored by the single-table formats.
pub fn load_file(path: &Path, sheet: &str) -> Result<PatientDataset> {
    let table = read_table(path, sheet)?;
    let dataset = table_to_dataset(&table)?;
    log::info!(
        "Loaded {} patients from {} (genders: {:?})",
        dataset.len(),
        path.display(),
        dataset.genders
    );
    Ok(dataset)
}

/// Read the raw cells of a file without interpreting any column.
pub fn read_table(path: &Path, sheet: &str) -> Result<RawTable> {
    std::fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, sheet)?,
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string()).into()),
    };
    Ok(table)
}

// ---------------------------------------------------------------------------
// Typing: RawTable → PatientDataset
// ---------------------------------------------------------------------------

/// Locate the required columns and convert every non-empty row.
pub fn table_to_dataset(table: &RawTable) -> Result<PatientDataset> {
    let id_idx = locate_column(&table.headers, PATIENT_ID_HEADER)?;
    let gender_idx = locate_column(&table.headers, GENDER_HEADER)?;
    let mut numeric_idx = Vec::with_capacity(NumericColumn::ALL.len());
    for column in NumericColumn::ALL {
        numeric_idx.push((column, locate_column(&table.headers, column.header())?));
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut numeric_blasts = Vec::new();

    for (i, row) in table.rows.iter().enumerate() {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        let line = i + 1;
        let cell = |idx: usize| row.get(idx).unwrap_or(&CellValue::Empty);

        let mut record = PatientRecord {
            patient_id: cell(id_idx).to_string().trim().to_string(),
            gender: cell(gender_idx).to_string().trim().to_string(),
            age: 0.0,
            hemoglobin: 0.0,
            wbc_count: 0.0,
            blast_cell_pct: 0.0,
            survival_months: 0.0,
        };

        for &(column, idx) in &numeric_idx {
            let value = match column {
                NumericColumn::BlastCell => {
                    let value = percent_cell(cell(idx), line, column)?;
                    if matches!(cell(idx), CellValue::Number(_)) {
                        numeric_blasts.push(value);
                    }
                    value
                }
                _ => number_cell(cell(idx), line, column)?,
            };
            column.set(&mut record, value);
        }

        records.push(record);
    }

    if fractional_percentages(&numeric_blasts) {
        log::warn!(
            "All {} numeric '{}' cells lie within [0, 1]; they may be fractions of a percent-formatted column",
            numeric_blasts.len(),
            NumericColumn::BlastCell.header()
        );
    }

    Ok(PatientDataset::from_records(records))
}

/// Parse a percentage string such as `"45%"` into `45.0`.
///
/// Trailing percent signs are stripped before parsing; a bare number is
/// accepted as well. Non-finite results are rejected.
pub fn parse_percent(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// A numeric cell is taken as already being in percent units. Excel cells
/// formatted as a percentage store the fraction (`0.45` for `45%`), which
/// [`fractional_percentages`] flags after loading.
fn percent_cell(cell: &CellValue, row: usize, column: NumericColumn) -> Result<f64> {
    match cell {
        CellValue::Number(v) => finite_number(*v, row, column),
        CellValue::Text(s) => parse_percent(s).ok_or_else(|| parse_error(row, column, s).into()),
        CellValue::Empty => Err(parse_error(row, column, "").into()),
    }
}

fn number_cell(cell: &CellValue, row: usize, column: NumericColumn) -> Result<f64> {
    match cell {
        CellValue::Number(v) => finite_number(*v, row, column),
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| parse_error(row, column, s).into()),
        CellValue::Empty => Err(parse_error(row, column, "").into()),
    }
}

fn finite_number(v: f64, row: usize, column: NumericColumn) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(parse_error(row, column, &v.to_string()).into())
    }
}

/// True when every numeric Blast Cell % cell lies in [0, 1], the signature of
/// a percent-formatted spreadsheet column holding fractions.
pub fn fractional_percentages(numeric_values: &[f64]) -> bool {
    !numeric_values.is_empty() && numeric_values.iter().all(|v| (0.0..=1.0).contains(v))
}

fn parse_error(row: usize, column: NumericColumn, value: &str) -> ParseError {
    ParseError {
        row,
        column: column.header().to_string(),
        value: value.to_string(),
    }
}

fn locate_column(headers: &[String], name: &str) -> std::result::Result<usize, LoadError> {
    let wanted = canonical_header(name);
    headers
        .iter()
        .position(|h| canonical_header(h) == wanted)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Trim and fold the Greek mu into the micro sign so `10^3/μL` matches `10^3/µL`.
fn canonical_header(header: &str) -> String {
    header.trim().replace('\u{03BC}', "\u{00B5}")
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// First row of the sheet is the header row.
fn load_workbook(path: &Path, sheet: &str) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(LoadError::MissingSheet {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            available,
        }
        .into());
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| LoadError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Err(LoadError::Malformed(format!("sheet '{sheet}' is empty")).into()),
    };
    let rows = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every CSV field is kept as text; numeric columns are parsed during typing
/// so identifiers like `007` survive untouched.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(source) = err.into_kind() {
            return LoadError::Io {
                path: path.to_path_buf(),
                source,
            };
        }
        return LoadError::Malformed(format!("{}: I/O failure", path.display()));
    }
    LoadError::Malformed(format!("{}: {err}", path.display()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per attribute.
///
/// String, integer and float columns are supported; anything else is kept as
/// its textual type name so the typing step reports it.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| malformed(path, e))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(|e| malformed(path, e))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| malformed(path, e))?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable { headers, rows })
}

fn malformed(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::Malformed(format!("{}: {err}", path.display()))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Empty;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>().map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| CellValue::Number(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::Text(format!("{:?}", col.data_type())))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Patient ID": "P001", "Gender": "Male", "Age (years)": 45, "Blast Cell %": "32%", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| LoadError::Malformed(format!("{}: {e}", path.display())))?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("record {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_cell).unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::error::DatasetError;

    const HEADER: &str = "Patient ID,Gender,Age (years),Hemoglobin Level (g/dL),WBC Count (10^3/µL),Blast Cell %,Survival Time (months)";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("patient-dashboard-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::Text(c.to_string())).collect()
    }

    fn raw_table(rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            headers: HEADER.split(',').map(str::to_string).collect(),
            rows,
        }
    }

    #[test]
    fn percent_strings_are_parsed() {
        assert_eq!(parse_percent("45%"), Some(45.0));
        assert_eq!(parse_percent(" 12.5 % "), Some(12.5));
        assert_eq!(parse_percent("80"), Some(80.0));
        assert_eq!(parse_percent("abc%"), None);
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent("NaN%"), None);
    }

    #[test]
    fn table_rows_become_records() {
        let table = raw_table(vec![
            text_row(&["P001", "Male", "45", "11.2", "25.4", "45%", "18"]),
            vec![CellValue::Empty; 7],
            vec![
                CellValue::Number(2.0),
                CellValue::Text("Female".into()),
                CellValue::Number(61.0),
                CellValue::Number(9.8),
                CellValue::Number(40.1),
                CellValue::Text("72%".into()),
                CellValue::Number(6.0),
            ],
        ]);

        let ds = table_to_dataset(&table).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].patient_id, "P001");
        assert_eq!(ds.records[0].blast_cell_pct, 45.0);
        assert_eq!(ds.records[1].patient_id, "2");
        assert_eq!(ds.records[1].age, 61.0);
        assert_eq!(ds.records[1].blast_cell_pct, 72.0);
        assert_eq!(ds.genders, vec!["Male", "Female"]);
    }

    #[test]
    fn bad_percentage_is_a_parse_error() {
        let table = raw_table(vec![text_row(&["P001", "Male", "45", "11.2", "25.4", "lots", "18"])]);
        match table_to_dataset(&table) {
            Err(DatasetError::Parse(e)) => {
                assert_eq!(e.row, 1);
                assert_eq!(e.column, "Blast Cell %");
                assert_eq!(e.value, "lots");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let mut table = raw_table(vec![]);
        table.headers.retain(|h| h != "Gender");
        match table_to_dataset(&table) {
            Err(DatasetError::Load(LoadError::MissingColumn(col))) => assert_eq!(col, "Gender"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn greek_mu_header_is_accepted() {
        let mut table = raw_table(vec![text_row(&["P1", "Male", "45", "11", "25", "45%", "18"])]);
        table.headers[4] = "WBC Count (10^3/\u{03BC}L)".to_string();
        assert_eq!(table_to_dataset(&table).unwrap().records[0].wbc_count, 25.0);
    }

    #[test]
    fn csv_file_loads_every_row() {
        let contents = format!(
            "{HEADER}\nP001,Male,45,11.2,25.4,45%,18\nP002,Female,33,12.9,8.1,12%,40\n007,Female,70,10.0,30.0,88.5%,3\n"
        );
        let path = write_temp("rows.csv", &contents);
        let ds = load_file(&path, "Table 1").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[2].patient_id, "007");
        assert_eq!(ds.records[2].blast_cell_pct, 88.5);
        assert_eq!(ds.records[1].survival_months, 40.0);
    }

    #[test]
    fn json_records_load() {
        let contents = r#"[
            {"Patient ID": "P1", "Gender": "Male", "Age (years)": 50, "Hemoglobin Level (g/dL)": 13.1,
             "WBC Count (10^3/µL)": 7.5, "Blast Cell %": "20%", "Survival Time (months)": 30}
        ]"#;
        let path = write_temp("records.json", contents);
        let ds = load_file(&path, "ignored").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].age, 50.0);
        assert_eq!(ds.records[0].blast_cell_pct, 20.0);
    }

    #[test]
    fn parquet_columns_load() {
        let path = temp_path("patients.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("Patient ID", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Age (years)", DataType::Int64, false),
            Field::new("Hemoglobin Level (g/dL)", DataType::Float64, false),
            Field::new("WBC Count (10^3/µL)", DataType::Float64, false),
            Field::new("Blast Cell %", DataType::Utf8, false),
            Field::new("Survival Time (months)", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["P1", "P2"])),
                Arc::new(StringArray::from(vec!["Male", "Female"])),
                Arc::new(Int64Array::from(vec![40, 58])),
                Arc::new(Float64Array::from(vec![12.0, 9.5])),
                Arc::new(Float64Array::from(vec![6.0, 44.0])),
                Arc::new(StringArray::from(vec!["15%", "63%"])),
                Arc::new(Int64Array::from(vec![36, 9])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path, "ignored").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].age, 58.0);
        assert_eq!(ds.records[1].blast_cell_pct, 63.0);
        assert_eq!(ds.records[0].survival_months, 36.0);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let path = temp_path("does-not-exist.xlsx");
        assert!(matches!(
            load_file(&path, "Table 1"),
            Err(DatasetError::Load(LoadError::Io { .. }))
        ));
    }

    #[test]
    fn garbage_workbook_is_a_load_error() {
        let path = write_temp("garbage.xlsx", "this is not a zip archive");
        let result = load_file(&path, "Table 1");
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(DatasetError::Load(LoadError::Workbook { .. }))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_temp("patients.txt", "whatever");
        let result = load_file(&path, "Table 1");
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(DatasetError::Load(LoadError::UnsupportedFormat(ext))) if ext == "txt"
        ));
    }

    #[test]
    fn non_finite_numbers_are_parse_errors() {
        let mut row = text_row(&["P001", "Male", "45", "11.2", "25.4", "45%", "18"]);
        row[3] = CellValue::Number(f64::NAN);
        match table_to_dataset(&raw_table(vec![row])) {
            Err(DatasetError::Parse(e)) => {
                assert_eq!(e.column, "Hemoglobin Level (g/dL)");
                assert_eq!(e.value, "NaN");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let mut row = text_row(&["P001", "Male", "45", "11.2", "25.4", "45%", "18"]);
        row[5] = CellValue::Number(f64::INFINITY);
        assert!(matches!(
            table_to_dataset(&raw_table(vec![row])),
            Err(DatasetError::Parse(e)) if e.column == "Blast Cell %"
        ));
    }

    #[test]
    fn fraction_valued_percentages_are_flagged() {
        assert!(fractional_percentages(&[0.45, 0.12, 1.0]));
        assert!(!fractional_percentages(&[45.0, 0.5]));
        assert!(!fractional_percentages(&[]));
    }

    fn write_workbook(name: &str, sheet: &str) -> PathBuf {
        let path = temp_path(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet().set_name(sheet).unwrap();
        for (col, header) in HEADER.split(',').enumerate() {
            worksheet.write_string(0, col as u16, header).unwrap();
        }
        let rows: [(f64, &str, f64, f64, f64, &str, f64); 2] = [
            (7.0, "Male", 45.0, 11.2, 25.4, "45%", 18.0),
            (12.0, "Female", 61.0, 9.8, 40.1, "72%", 6.0),
        ];
        for (i, (id, gender, age, hb, wbc, blast, survival)) in rows.into_iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_number(r, 0, id).unwrap();
            worksheet.write_string(r, 1, gender).unwrap();
            worksheet.write_number(r, 2, age).unwrap();
            worksheet.write_number(r, 3, hb).unwrap();
            worksheet.write_number(r, 4, wbc).unwrap();
            worksheet.write_string(r, 5, blast).unwrap();
            worksheet.write_number(r, 6, survival).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn workbook_sheet_loads() {
        let path = write_workbook("patients.xlsx", "Table 1");
        let ds = load_file(&path, "Table 1");
        std::fs::remove_file(&path).ok();
        let ds = ds.unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].patient_id, "7");
        assert_eq!(ds.records[0].blast_cell_pct, 45.0);
        assert_eq!(ds.records[1].hemoglobin, 9.8);
        assert_eq!(ds.records[1].blast_cell_pct, 72.0);
        assert_eq!(ds.genders, vec!["Male", "Female"]);
    }

    #[test]
    fn wrong_sheet_lists_available_sheets() {
        let path = write_workbook("other-sheet.xlsx", "Patients");
        let result = load_file(&path, "Table 1");
        std::fs::remove_file(&path).ok();
        match result {
            Err(DatasetError::Load(LoadError::MissingSheet { sheet, available, .. })) => {
                assert_eq!(sheet, "Table 1");
                assert_eq!(available, vec!["Patients".to_string()]);
            }
            other => panic!("expected missing sheet, got {other:?}"),
        }
    }

    #[test]
    fn integer_workbook_cells_print_without_fraction() {
        assert!(matches!(workbook_cell(&Data::Int(7)), CellValue::Number(v) if v == 7.0));
        assert_eq!(workbook_cell(&Data::Int(7)).to_string(), "7");
        assert_eq!(workbook_cell(&Data::Float(12.0)).to_string(), "12");
        assert!(workbook_cell(&Data::Empty).is_empty());
    }
}
