//! Index creation and dataset loading

use crate::elastic::ElasticClient;
use crate::error::Result;
use crate::loader::{AttributeMode, DelimiterLoader, LoadStats, LoaderOptions};
use crate::mapping::datasets::Dataset;
use crate::mapping::properties::MappingProperties;
use flate2::read::MultiGzDecoder;
use reqwest::StatusCode;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Creates an index schema and loads a dataset into it
pub struct IndexManager<'a> {
    client: &'a ElasticClient,
}

impl<'a> IndexManager<'a> {
    pub fn new(client: &'a ElasticClient) -> Self {
        Self { client }
    }

    /// Explicit index name lower-cased, else the dataset identity
    pub fn index_name(options: &LoaderOptions, dataset: &dyn Dataset) -> String {
        options
            .index_name
            .as_deref()
            .unwrap_or_else(|| dataset.identity())
            .to_lowercase()
    }

    /// Submit `mapping` as the schema of `index`.
    ///
    /// An existing index and a non-200 answer are both reported as warnings;
    /// neither stops the caller. Returns whether the service accepted the schema.
    pub fn put_mapping(&self, index: &str, mapping: &MappingProperties) -> Result<bool> {
        let probe = self.client.get(index, None)?;
        if probe.status == StatusCode::OK {
            warn!(index = index, "mapping already exists");
        }

        let response = self.client.put_json(index, &mapping.to_json())?;
        if response.status != StatusCode::OK {
            warn!(
                index = index,
                status = response.status.as_u16(),
                "mapping submission not accepted"
            );
            return Ok(false);
        }

        info!(index = index, index_type = mapping.index_type(), "mapping created");
        Ok(true)
    }

    /// Open an input file, decompressing `.gz` files
    pub fn open_file_to_load(path: &Path) -> Result<Box<dyn BufRead>> {
        let file = File::open(path)?;
        let is_gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        if is_gzip {
            // bgzip output is a series of gzip members; read them all.
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    /// Create the dataset's schema, then bulk load `options.file_path` into it
    pub fn create_load_index(
        &self,
        dataset: &dyn Dataset,
        options: &LoaderOptions,
    ) -> Result<LoadStats> {
        options.validate()?;

        let index = Self::index_name(options, dataset);
        let mapping = dataset.mapping();
        self.put_mapping(&index, &mapping)?;

        let reader = Self::open_file_to_load(&options.file_path)?;
        let mode = match options.attribute_mode() {
            AttributeMode::None => dataset.attribute_mode(),
            mode => mode,
        };
        let batch_size = options.batch_size.unwrap_or_else(|| dataset.batch_size());

        info!(
            index = %index,
            index_type = dataset.index_type(),
            file = %options.file_path.display(),
            batch_size = batch_size,
            "loading dataset"
        );

        let stats = DelimiterLoader::new(self.client)
            .delimiter(options.delimiter.clone())
            .attribute_mode(mode)
            .batch_size(batch_size)
            .load(&mapping.column_names(), reader, &index, dataset.index_type())?;

        info!(
            index = %index,
            documents = stats.documents,
            batches = stats.batches,
            "dataset loaded"
        );
        Ok(stats)
    }
}
