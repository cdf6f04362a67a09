/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TabularDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ TabularDataset  │  Vec<Column>, typed cells
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐   ┌────────────┐
///   │  filter   │   │ aggregate  │  date-range rows / group-by reduction
///   └──────────┘   └────────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
