/// Data layer: table types, loading, queries and export.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (headers + text rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TableEngine   │  original rows + working rows
///   └──────────────┘
///        │
///        ▼
///   filter · sort · aggregate · pattern · display  →  export
/// ```

pub mod aggregate;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pattern;
pub mod sort;
