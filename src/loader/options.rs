//! Loader options

use crate::error::{AppError, Result};
use crate::loader::transcode::AttributeMode;
use serde::Serialize;
use std::path::PathBuf;

/// Options recognised by a dataset load
#[derive(Debug, Clone, Serialize)]
pub struct LoaderOptions {
    /// Target index; lower-cased before use. Unset means the dataset's default.
    pub index_name: Option<String>,

    /// Input file, gzip-compressed when the name ends in `.gz`
    pub file_path: PathBuf,

    /// Column delimiter (default: tab)
    pub delimiter: String,

    /// Last column holds GFF3 attributes
    pub is_gff: bool,

    /// Last column holds GTF attributes
    pub is_gtf: bool,

    /// Documents per bulk request; unset means the dataset's default
    pub batch_size: Option<usize>,
}

impl LoaderOptions {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            index_name: None,
            file_path: file_path.into(),
            delimiter: "\t".to_string(),
            is_gff: false,
            is_gtf: false,
            batch_size: None,
        }
    }

    pub fn builder(file_path: impl Into<PathBuf>) -> LoaderOptionsBuilder {
        LoaderOptionsBuilder {
            options: Self::new(file_path),
        }
    }

    pub fn attribute_mode(&self) -> AttributeMode {
        AttributeMode::from_flags(self.is_gff, self.is_gtf)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(AppError::InvalidArgument(
                "delimiter must not be empty".to_string(),
            ));
        }
        if self.batch_size == Some(0) {
            return Err(AppError::InvalidArgument(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for LoaderOptions
pub struct LoaderOptionsBuilder {
    options: LoaderOptions,
}

impl LoaderOptionsBuilder {
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.options.index_name = Some(name.into());
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.delimiter = delimiter.into();
        self
    }

    pub fn gff(mut self, enabled: bool) -> Self {
        self.options.is_gff = enabled;
        self
    }

    pub fn gtf(mut self, enabled: bool) -> Self {
        self.options.is_gtf = enabled;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.options.batch_size = Some(size);
        self
    }

    pub fn build(self) -> Result<LoaderOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoaderOptions::new("snp.vcf.gz");
        assert_eq!(options.delimiter, "\t");
        assert!(options.index_name.is_none());
        assert!(options.batch_size.is_none());
        assert_eq!(options.attribute_mode(), AttributeMode::None);
    }

    #[test]
    fn test_builder() {
        let options = LoaderOptions::builder("genes.gff")
            .index_name("GENES")
            .gff(true)
            .batch_size(500)
            .build()
            .unwrap();

        assert_eq!(options.index_name.as_deref(), Some("GENES"));
        assert_eq!(options.batch_size, Some(500));
        assert_eq!(options.attribute_mode(), AttributeMode::Gff);
    }

    #[test]
    fn test_invalid_options() {
        assert!(LoaderOptions::builder("a.tsv").delimiter("").build().is_err());
        assert!(LoaderOptions::builder("a.tsv").batch_size(0).build().is_err());
    }
}
