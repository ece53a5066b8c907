/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   URL / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse CSV → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, distinct values per dimension
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  FilteredView → metrics, rankings, histogram, counts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
