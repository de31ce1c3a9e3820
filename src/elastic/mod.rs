//! Access to the document-index service
//!
//! The service is treated as a black box speaking JSON over HTTP:
//!
//! | Request | Used for |
//! |---------|----------|
//! | `HEAD /{index}` | existence check |
//! | `GET /{index}` | existence/mapping probe before a schema is submitted |
//! | `PUT /{index}` | schema submission |
//! | `PUT /{index}/{type}/_bulk` | bulk document load |
//! | `GET /{index}[/{type}]/_search` | query execution |
//! | `GET /{index}[/{type}]/_count` | document counts |
//! | `GET /{index}/_mapping[/{type}]` | mapping lookup |

mod client;
mod search;

pub use client::{ElasticClient, RawResponse};
pub use search::{
    CountResponse, MappingResponse, Search, SearchHit, SearchResponse, ServiceError,
    DEFAULT_PAGE_SIZE,
};
