/// Data layer: core types, loading, filtering and counting.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → matching rows, original order
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  count_by(City / Membership Type) → charts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
