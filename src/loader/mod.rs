//! Bulk loading of delimited genomic files
//!
//! A line flows through [`transcode_line`] (which uses [`parse_attributes`] for
//! GFF/GTF attribute columns) into a [`BulkBatch`], which sends newline-delimited
//! action/document pairs to `PUT /{index}/{type}/_bulk`.
//!
//! ```text
//! file ──► lines ──► transcode_line ──► BulkBatch ──► PUT /{index}/{type}/_bulk
//!            │            │                 │
//!            │       skip '#' and        flush when pending > batch size,
//!            │       ragged lines        and once more on finish/drop
//! ```

mod attributes;
mod bulk;
mod options;
mod transcode;

pub use attributes::{
    parse_attributes, Attributes, GFF_KEY_VALUE_DELIMITER, GTF_KEY_VALUE_DELIMITER,
};
pub use bulk::{BulkBatch, DelimiterLoader, LoadStats, DEFAULT_BATCH_SIZE};
pub use options::{LoaderOptions, LoaderOptionsBuilder};
pub use transcode::{infer_value, transcode_line, AttributeMode, Document, FieldValue};
