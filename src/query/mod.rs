//! Fluent construction of search requests
//!
//! Leaf clauses ([`Query::term`], [`Query::terms`], [`Query::match_query`],
//! [`Query::query_string`], [`RangeQuery`]) compose into bool queries and filters,
//! and an [`ElasticQuery`] wraps the tree into a request body.
//!
//! # Example
//!
//! ```
//! use genomic_search::query::{BoolQuery, ElasticQuery, Highlight, Query, RangeQuery};
//!
//! let filter = BoolQuery::new()
//!     .must(Query::term("seqid", 1))
//!     .should(RangeQuery::new("start").lte(20000));
//!
//! let query = ElasticQuery::filtered_bool(Query::query_string("rs3733*", ["id"]), filter)
//!     .sources(["id", "seqid", "start"])
//!     .highlight(Highlight::new("id"))
//!     .size(20);
//!
//! let body = query.to_body();
//! assert!(body["query"]["filtered"]["filter"]["bool"]["must"].is_array());
//! ```

mod compound;
mod envelope;
mod highlight;
mod primitives;
mod region;

pub use compound::{AndFilter, BoolQuery, Filter, NotFilter, OrFilter, TermsFilter};
pub use envelope::ElasticQuery;
pub use highlight::Highlight;
pub use primitives::{
    MatchQuery, Query, QueryStringQuery, RangeQuery, TermQuery, TermsQuery,
};
pub use region::Region;
