//! Built-in dataset schemas

use crate::loader::{AttributeMode, DEFAULT_BATCH_SIZE};
use crate::mapping::properties::{FieldMapping, FieldType, IndexMode, MappingProperties};

/// Timestamp format used by dbSNP merge history dumps
pub const DBSNP_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss.SSS";

/// A kind of input file the Index Manager knows how to load
pub trait Dataset {
    /// Default index name when the caller does not supply one
    fn identity(&self) -> &str;

    /// Index type the documents are loaded into
    fn index_type(&self) -> &str;

    /// Schema; its declaration order is the file's column order
    fn mapping(&self) -> MappingProperties;

    /// How the last column is parsed
    fn attribute_mode(&self) -> AttributeMode {
        AttributeMode::None
    }

    /// Documents per bulk request
    fn batch_size(&self) -> usize {
        DEFAULT_BATCH_SIZE
    }
}

/// dbSNP VCF markers
#[derive(Debug, Clone, Copy, Default)]
pub struct SnpMarkers;

impl Dataset for SnpMarkers {
    fn identity(&self) -> &str {
        "marker"
    }

    fn index_type(&self) -> &str {
        "marker"
    }

    fn mapping(&self) -> MappingProperties {
        MappingProperties::new(self.index_type())
            .add_property("seqid", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("start", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("id", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("ref", FieldType::String, IndexMode::No)
            .add_property("alt", FieldType::String, IndexMode::No)
            .add_property("qual", FieldType::String, IndexMode::No)
            .add_property("filter", FieldType::String, IndexMode::No)
            .add_property("info", FieldType::String, IndexMode::No)
    }

    fn batch_size(&self) -> usize {
        20_000
    }
}

/// dbSNP rs merge history (`RsMergeArch`)
#[derive(Debug, Clone, Copy, Default)]
pub struct RsMerge;

impl Dataset for RsMerge {
    fn identity(&self) -> &str {
        "rs_merge"
    }

    fn index_type(&self) -> &str {
        "rs_merge"
    }

    fn mapping(&self) -> MappingProperties {
        MappingProperties::new(self.index_type())
            .add_property("rshigh", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("rslow", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("build_id", FieldType::Integer, IndexMode::No)
            .add_property("orien", FieldType::Integer, IndexMode::No)
            .add_field(
                FieldMapping::new("create_time", FieldType::Date)
                    .index(IndexMode::No)
                    .format(DBSNP_DATE_FORMAT),
            )
            .add_field(
                FieldMapping::new("last_updated_time", FieldType::Date)
                    .index(IndexMode::No)
                    .format(DBSNP_DATE_FORMAT),
            )
            .add_property("rscurrent", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("orien2current", FieldType::String, IndexMode::No)
            .add_property("notes", FieldType::String, IndexMode::No)
    }
}

/// GFF3 or GTF feature annotations
#[derive(Debug, Clone, Copy)]
pub struct GenomicFeatures {
    mode: AttributeMode,
}

impl GenomicFeatures {
    pub fn gff() -> Self {
        Self {
            mode: AttributeMode::Gff,
        }
    }

    pub fn gtf() -> Self {
        Self {
            mode: AttributeMode::Gtf,
        }
    }
}

impl Dataset for GenomicFeatures {
    fn identity(&self) -> &str {
        match self.mode {
            AttributeMode::Gtf => "gtf",
            _ => "gff",
        }
    }

    fn index_type(&self) -> &str {
        self.identity()
    }

    fn mapping(&self) -> MappingProperties {
        MappingProperties::new(self.index_type())
            .add_property("seqid", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("source", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("type", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("start", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("end", FieldType::Integer, IndexMode::NotAnalyzed)
            .add_property("score", FieldType::String, IndexMode::No)
            .add_property("strand", FieldType::String, IndexMode::NotAnalyzed)
            .add_property("phase", FieldType::String, IndexMode::No)
            .add_field(FieldMapping::new("attr", FieldType::Object))
    }

    fn attribute_mode(&self) -> AttributeMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snp_columns_follow_vcf_order() {
        assert_eq!(
            SnpMarkers.mapping().column_names(),
            vec!["seqid", "start", "id", "ref", "alt", "qual", "filter", "info"]
        );
        assert_eq!(SnpMarkers.batch_size(), 20_000);
    }

    #[test]
    fn test_rs_merge_dates_have_format() {
        let mapping = RsMerge.mapping();
        assert_eq!(mapping.fields().len(), 9);
        let create_time = &mapping.fields()[4];
        assert_eq!(create_time.name, "create_time");
        assert_eq!(create_time.format.as_deref(), Some(DBSNP_DATE_FORMAT));
        assert_eq!(RsMerge.batch_size(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_feature_datasets() {
        let gff = GenomicFeatures::gff();
        let gtf = GenomicFeatures::gtf();
        assert_eq!(gff.index_type(), "gff");
        assert_eq!(gtf.index_type(), "gtf");
        assert_eq!(gff.attribute_mode(), AttributeMode::Gff);
        assert_eq!(gtf.attribute_mode(), AttributeMode::Gtf);
        assert_eq!(gff.mapping().column_names().len(), 9);
        assert_eq!(gff.mapping().column_names().last().unwrap(), "attr");
    }
}
