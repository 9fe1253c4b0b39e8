/// Data layer: artifact discovery, table loading, derived statistics.
///
/// Architecture:
/// ```text
///  data/ directory (CSV, HTML, PNG)
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  locate   │     │  loader   │   scan slice files / parse CSV → Table
///   └──────────┘     └──────────┘
///        │                 │
///        ▼                 ▼
///   ┌──────────────┐  ┌──────────┐
///   │ SliceArtifact │  │  Table    │   height-ordered descriptors / columns
///   └──────────────┘  └──────────┘
///                          │
///                          ▼
///                     ┌──────────┐
///                     │  stats    │   describe, extrema, bottom reference
///                     └──────────┘
/// ```
pub mod loader;
pub mod locate;
pub mod model;
pub mod stats;
