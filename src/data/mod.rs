/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, site index, payload bounds
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  selection → breakdown / scatter points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
