/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///   time,value CSV
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series   │  raw records + parsed samples
///   └──────────┘
///        │   + LabelSet
///        ▼
///   ┌──────────┐
///   │  export   │  per-row label → CSV + means
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
