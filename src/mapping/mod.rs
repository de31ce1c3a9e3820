//! Index schemas and the index-one-dataset orchestration
//!
//! ```text
//! Dataset ──mapping()──► MappingProperties ──to_json()──► PUT /{index}
//!    │                                                        │
//!    └── column_names() ──► DelimiterLoader ──► PUT /{index}/{type}/_bulk
//! ```

mod datasets;
mod manager;
mod properties;

pub use datasets::{Dataset, GenomicFeatures, RsMerge, SnpMarkers, DBSNP_DATE_FORMAT};
pub use manager::IndexManager;
pub use properties::{Analyzer, FieldMapping, FieldType, IndexMode, MappingProperties};
