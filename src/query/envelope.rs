//! The top-level search request body

use crate::query::compound::BoolQuery;
use crate::query::highlight::Highlight;
use crate::query::primitives::Query;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A complete search request: one query tree plus paging, sourcing and
/// highlight options. One envelope produces one request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticQuery {
    query: Query,
    filter: Option<Query>,
    sources: Option<Vec<String>>,
    highlight: Option<Highlight>,
    size: Option<usize>,
}

impl ElasticQuery {
    pub fn new(query: impl Into<Query>) -> Self {
        Self {
            query: query.into(),
            filter: None,
            sources: None,
            highlight: None,
            size: None,
        }
    }

    pub fn bool(query: BoolQuery) -> Self {
        Self::new(query)
    }

    /// Filtered query: `query` scores, `filter` restricts
    pub fn filtered(query: impl Into<Query>, filter: impl Into<Query>) -> Self {
        let mut envelope = Self::new(query);
        envelope.filter = Some(filter.into());
        envelope
    }

    /// Filtered query whose filter is a bool query
    pub fn filtered_bool(query: impl Into<Query>, filter: BoolQuery) -> Self {
        Self::filtered(query, filter)
    }

    pub fn query_string<S: Into<String>>(
        query: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(Query::query_string(query, fields))
    }

    pub fn query_match(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Query::match_query(field, value))
    }

    /// Restrict the returned `_source` to these fields
    pub fn sources<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.sources = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Page size
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn page_size(&self) -> Option<usize> {
        self.size
    }

    /// The `query` member alone, as sent to the count endpoint
    pub fn query_json(&self) -> Value {
        match self.filter {
            Some(ref filter) => json!({
                "filtered": {
                    "query": self.query.to_json(),
                    "filter": filter.to_json(),
                }
            }),
            None => self.query.to_json(),
        }
    }

    /// Full search request body
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query_json());
        if let Some(ref sources) = self.sources {
            body.insert("_source".to_string(), json!(sources));
        }
        if let Some(ref highlight) = self.highlight {
            body.insert("highlight".to_string(), highlight.to_json());
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        Value::Object(body)
    }
}

impl Serialize for ElasticQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_body().serialize(serializer)
    }
}
