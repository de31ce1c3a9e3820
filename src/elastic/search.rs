//! Search executor: results, counts, mappings and existence probes

use crate::elastic::client::{ElasticClient, RawResponse};
use crate::error::Result;
use crate::query::ElasticQuery;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Page size used when neither the search nor the query sets one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Error reported by the index service in a response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceError {
    /// HTTP status of the response
    pub status: u16,

    /// The service's `error` member, or the whole body when absent
    pub reason: Value,
}

impl ServiceError {
    fn from_response(response: &RawResponse) -> Option<Self> {
        let reported = response.body.get("error").cloned();
        if response.is_success() && reported.is_none() {
            return None;
        }
        Some(Self {
            status: response.status.as_u16(),
            reason: reported.unwrap_or_else(|| response.body.clone()),
        })
    }
}

/// A single search result hit
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub index: String,
    pub doc_type: Option<String>,
    pub score: Option<f64>,
    pub source: Value,
    pub highlight: Option<Value>,
}

impl SearchHit {
    fn from_json(hit: &Value) -> Self {
        Self {
            id: string_member(hit, "_id"),
            index: string_member(hit, "_index"),
            doc_type: hit.get("_type").and_then(Value::as_str).map(str::to_string),
            score: hit.get("_score").and_then(Value::as_f64),
            source: hit.get("_source").cloned().unwrap_or(Value::Null),
            highlight: hit.get("highlight").cloned(),
        }
    }
}

fn string_member(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Search response with hits and total count
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub total: u64,
    pub hits: Vec<SearchHit>,
    pub error: Option<ServiceError>,
}

impl SearchResponse {
    fn from_response(response: RawResponse) -> Self {
        if let Some(error) = ServiceError::from_response(&response) {
            return Self {
                total: 0,
                hits: Vec::new(),
                error: Some(error),
            };
        }

        let hits = &response.body["hits"];
        // Older services report a number, newer ones `{"value": n, ...}`.
        let total = hits["total"]
            .as_u64()
            .or_else(|| hits["total"]["value"].as_u64())
            .unwrap_or(0);
        let hits = hits["hits"]
            .as_array()
            .map(|hits| hits.iter().map(SearchHit::from_json).collect())
            .unwrap_or_default();

        Self {
            total,
            hits,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Document count for an index or query
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: u64,
    pub error: Option<ServiceError>,
}

impl CountResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Mapping lookup result; errors are flagged rather than raised
#[derive(Debug, Clone, Serialize)]
pub struct MappingResponse {
    pub body: Value,
    pub error: Option<ServiceError>,
}

impl MappingResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Mapping section for `index`, if present in the response
    pub fn index(&self, index: &str) -> Option<&Value> {
        self.body.get(index)
    }
}

/// Executes requests against one index (and optionally one type)
pub struct Search<'a> {
    client: &'a ElasticClient,
    query: Option<ElasticQuery>,
    index: String,
    index_type: Option<String>,
    size: Option<usize>,
}

impl<'a> Search<'a> {
    pub fn new(client: &'a ElasticClient, index: impl Into<String>) -> Self {
        Self {
            client,
            query: None,
            index: index.into(),
            index_type: None,
            size: None,
        }
    }

    pub fn query(mut self, query: ElasticQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn index_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = Some(index_type.into());
        self
    }

    /// Page size; takes precedence over the query's own size
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    fn path(&self, endpoint: &str) -> String {
        match self.index_type {
            Some(ref index_type) => format!("{}/{}/{}", self.index, index_type, endpoint),
            None => format!("{}/{}", self.index, endpoint),
        }
    }

    /// Request body sent by [`Search::get_result`]
    pub fn request_body(&self) -> Value {
        let mut body = match self.query {
            Some(ref query) => query.to_body(),
            None => json!({ "query": { "match_all": {} } }),
        };
        let size = self
            .size
            .or_else(|| self.query.as_ref().and_then(ElasticQuery::page_size))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        body["size"] = json!(size);
        body
    }

    /// Run the query and return hits plus total count
    pub fn get_result(&self) -> Result<SearchResponse> {
        let body = self.request_body();
        let response = self.client.get(&self.path("_search"), Some(&body))?;
        let result = SearchResponse::from_response(response);

        match result.error {
            Some(ref error) => warn!(index = %self.index, status = error.status, "search failed"),
            None => debug!(index = %self.index, total = result.total, "search complete"),
        }
        Ok(result)
    }

    /// Count the documents matching the query, or all documents without one
    pub fn get_count(&self) -> Result<CountResponse> {
        let body = self
            .query
            .as_ref()
            .map(|query| json!({ "query": query.query_json() }));
        let response = self.client.get(&self.path("_count"), body.as_ref())?;

        let error = ServiceError::from_response(&response);
        let count = response.body["count"].as_u64().unwrap_or(0);
        Ok(CountResponse { count, error })
    }

    /// Mapping of the index, or of `mapping_type` within it
    pub fn get_mapping(&self, mapping_type: Option<&str>) -> Result<MappingResponse> {
        let path = match mapping_type {
            Some(mapping_type) => format!("{}/_mapping/{}", self.index, mapping_type),
            None => format!("{}/_mapping", self.index),
        };
        let response = self.client.get(&path, None)?;

        let error = ServiceError::from_response(&response);
        // Some service versions answer an unknown type with 200 and `{}`.
        let error = error.or_else(|| match response.body.as_object() {
            Some(body) if body.is_empty() && mapping_type.is_some() => Some(ServiceError {
                status: StatusCode::NOT_FOUND.as_u16(),
                reason: json!(format!("type[{}] missing", mapping_type.unwrap_or_default())),
            }),
            _ => None,
        });
        Ok(MappingResponse {
            body: response.body,
            error,
        })
    }

    /// HEAD probe: true when the index answers 200
    pub fn index_exists(client: &ElasticClient, index: &str) -> Result<bool> {
        Ok(client.head(index)? == StatusCode::OK)
    }
}
