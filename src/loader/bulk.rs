//! Streaming bulk loader

use crate::elastic::ElasticClient;
use crate::error::Result;
use crate::loader::transcode::{transcode_line, AttributeMode, Document};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::BufRead;
use tracing::{debug, error, info, warn};

/// Documents per bulk request when the caller does not choose
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Outcome of one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Documents sent to the index service
    pub documents: u64,

    /// Bulk requests issued
    pub batches: u64,
}

/// Buffered bulk request for one index type.
///
/// Documents accumulate as `{"index": {"_id": ...}}` / document line pairs and
/// are sent once more than `threshold` are pending. Whatever is still buffered
/// is sent by [`BulkBatch::finish`], or on drop when the batch is abandoned
/// through an early return or error.
pub struct BulkBatch<'a> {
    client: &'a ElasticClient,
    path: String,
    buffer: String,
    pending: usize,
    threshold: usize,
    stats: LoadStats,
    closed: bool,
}

impl<'a> BulkBatch<'a> {
    pub fn new(client: &'a ElasticClient, index: &str, index_type: &str, threshold: usize) -> Self {
        Self {
            client,
            path: format!("{}/{}/_bulk", index, index_type),
            buffer: String::new(),
            pending: 0,
            threshold,
            stats: LoadStats::default(),
            closed: false,
        }
    }

    /// Append one document; flushes when the pending count exceeds the threshold
    pub fn push(&mut self, id: u64, document: &Document) -> Result<()> {
        let source = serde_json::to_string(document)?;
        // Writing into a String cannot fail.
        let _ = writeln!(self.buffer, r#"{{"index": {{"_id": "{}"}}}}"#, id);
        self.buffer.push_str(&source);
        self.buffer.push('\n');
        self.pending += 1;
        self.stats.documents += 1;

        if self.pending > self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Send the buffered pairs as one bulk request and clear the buffer
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let body = std::mem::take(&mut self.buffer);
        let documents = std::mem::replace(&mut self.pending, 0);

        let response = self.client.put_bulk(&self.path, body)?;
        self.stats.batches += 1;

        if !response.is_success() {
            warn!(
                path = %self.path,
                status = response.status.as_u16(),
                "bulk request returned non-success status"
            );
        } else if response.body.get("errors").and_then(|e| e.as_bool()) == Some(true) {
            warn!(path = %self.path, "bulk response reports item errors");
        }

        info!(
            path = %self.path,
            batch = self.stats.batches,
            documents = documents,
            "bulk batch flushed"
        );
        Ok(())
    }

    /// Flush what remains and return the totals
    pub fn finish(mut self) -> Result<LoadStats> {
        self.closed = true;
        self.flush()?;
        Ok(self.stats)
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl Drop for BulkBatch<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.flush() {
            error!(path = %self.path, error = %e, "final bulk flush failed");
        }
    }
}

/// Loads delimited text into an index type through bulk requests
pub struct DelimiterLoader<'a> {
    client: &'a ElasticClient,
    delimiter: String,
    mode: AttributeMode,
    batch_size: usize,
}

impl<'a> DelimiterLoader<'a> {
    pub fn new(client: &'a ElasticClient) -> Self {
        Self {
            client,
            delimiter: "\t".to_string(),
            mode: AttributeMode::None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn attribute_mode(mut self, mode: AttributeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Stream `reader` into `index/index_type`.
    ///
    /// Document ids count from 1 and only advance for lines that produce a
    /// document. Lines that are not valid UTF-8 are skipped like ragged lines.
    /// A read error stops the load and is returned once the documents read so
    /// far have been flushed.
    pub fn load<R: BufRead>(
        &self,
        columns: &[String],
        mut reader: R,
        index: &str,
        index_type: &str,
    ) -> Result<LoadStats> {
        let mut batch = BulkBatch::new(self.client, index, index_type, self.batch_size);
        let mut next_id: u64 = 1;
        let mut skipped: u64 = 0;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line,
                Err(e) => {
                    debug!(index = index, error = %e, "skipping line that is not UTF-8");
                    skipped += 1;
                    continue;
                }
            };
            match transcode_line(line, columns, &self.delimiter, self.mode) {
                Some(document) => {
                    batch.push(next_id, &document)?;
                    next_id += 1;
                }
                None => skipped += 1,
            }
        }

        let stats = batch.finish()?;
        debug!(
            index = index,
            index_type = index_type,
            documents = stats.documents,
            skipped = skipped,
            "load complete"
        );
        Ok(stats)
    }
}
