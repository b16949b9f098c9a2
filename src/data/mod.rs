/// Data layer: core types, loading, scaling, filtering and chart statistics.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  sheet → RawTable → PatientDataset
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ normalize  │  min-max fit on the full dataset
///   └──────────┘          └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  histogram bins, correlation matrix of the filtered view
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod stats;
