use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const PATIENTS: usize = 10;

struct SamplePatient {
    id: String,
    gender: &'static str,
    age: i64,
    hemoglobin: f64,
    wbc_count: f64,
    blast_pct: i64,
    survival_months: i64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Higher blast percentage → lower hemoglobin and shorter survival.
fn generate(rng: &mut SimpleRng) -> Vec<SamplePatient> {
    (0..PATIENTS)
        .map(|i| {
            let severity = rng.next_f64();
            SamplePatient {
                id: format!("P{:03}", i + 1),
                gender: if rng.next_f64() < 0.5 { "Male" } else { "Female" },
                age: rng.uniform(18.0, 82.0).round() as i64,
                hemoglobin: round1(14.5 - 6.0 * severity + rng.uniform(-0.8, 0.8)),
                wbc_count: round1(4.0 + 80.0 * severity * rng.uniform(0.6, 1.2)),
                blast_pct: (5.0 + 85.0 * severity).round() as i64,
                survival_months: (60.0 * (1.0 - severity) + rng.uniform(1.0, 8.0)).round() as i64,
            }
        })
        .collect()
}

fn write_csv(path: &str, patients: &[SamplePatient]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Patient ID",
        "Gender",
        "Age (years)",
        "Hemoglobin Level (g/dL)",
        "WBC Count (10^3/µL)",
        "Blast Cell %",
        "Survival Time (months)",
    ])?;
    for p in patients {
        writer.write_record([
            p.id.clone(),
            p.gender.to_string(),
            p.age.to_string(),
            p.hemoglobin.to_string(),
            p.wbc_count.to_string(),
            format!("{}%", p.blast_pct),
            p.survival_months.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, patients: &[SamplePatient]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Patient ID", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Age (years)", DataType::Int64, false),
        Field::new("Hemoglobin Level (g/dL)", DataType::Float64, false),
        Field::new("WBC Count (10^3/µL)", DataType::Float64, false),
        Field::new("Blast Cell %", DataType::Utf8, false),
        Field::new("Survival Time (months)", DataType::Int64, false),
    ]));

    let blast: Vec<String> = patients.iter().map(|p| format!("{}%", p.blast_pct)).collect();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(patients.iter().map(|p| p.id.as_str()))),
            Arc::new(StringArray::from_iter_values(patients.iter().map(|p| p.gender))),
            Arc::new(Int64Array::from_iter_values(patients.iter().map(|p| p.age))),
            Arc::new(Float64Array::from_iter_values(patients.iter().map(|p| p.hemoglobin))),
            Arc::new(Float64Array::from_iter_values(patients.iter().map(|p| p.wbc_count))),
            Arc::new(StringArray::from_iter_values(blast.iter())),
            Arc::new(Int64Array::from_iter_values(patients.iter().map(|p| p.survival_months))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let patients = generate(&mut rng);

    write_csv("patient_dataset.csv", &patients)?;
    write_parquet("patient_dataset.parquet", &patients)?;

    println!(
        "Wrote {} patients to patient_dataset.csv and patient_dataset.parquet",
        patients.len()
    );
    Ok(())
}
