/// Data layer: core types, loading, normalization and selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  column totals → per-region percentage series
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection  │  chosen regions → visible series
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod normalize;
pub mod selection;

pub use normalize::DataError;
