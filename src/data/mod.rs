/// Data layer: sheet loading, normalization, filtering, and flattening.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  workbook → RawGrid per month sheet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  header row → Table of Records (Amount coerced)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  payment mode AND name selection → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  explode by name → Series of (category, amount)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod series;
