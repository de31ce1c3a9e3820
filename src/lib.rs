//! Genomic data search layer over a JSON document-index service.
//!
//! - [`query`]: fluent builders for term/terms/match/range/query-string
//!   clauses, bool queries, filters, highlighting and the request envelope.
//! - [`elastic`]: blocking client and the search executor (results, counts,
//!   mappings, existence checks).
//! - [`loader`]: transcodes delimited genomic files (VCF-like SNP data, GFF/GTF
//!   features) into documents and streams them as bulk requests.
//! - [`mapping`]: schema construction and the index-one-dataset orchestration.
//!
//! # Example
//!
//! ```no_run
//! use genomic_search::elastic::{ElasticClient, Search};
//! use genomic_search::loader::LoaderOptions;
//! use genomic_search::mapping::{IndexManager, SnpMarkers};
//! use genomic_search::query::{ElasticQuery, Query};
//!
//! fn main() -> genomic_search::Result<()> {
//!     let client = ElasticClient::new("http://localhost:9200", 60)?;
//!
//!     let options = LoaderOptions::builder("All_20150415.vcf.gz")
//!         .index_name("dbsnp144")
//!         .build()?;
//!     IndexManager::new(&client).create_load_index(&SnpMarkers, &options)?;
//!
//!     let query = ElasticQuery::new(Query::term("id", "rs2476601"));
//!     let result = Search::new(&client, "dbsnp144").query(query).get_result()?;
//!     println!("Found {} markers", result.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod elastic;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod query;

pub use error::{AppError, Result};
