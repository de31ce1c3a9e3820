//! Leaf query clauses and the recursive [`Query`] node

use crate::query::compound::{AndFilter, BoolQuery, NotFilter, OrFilter, TermsFilter};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A node of the query tree.
///
/// Leaves are built through the constructors on this type (`Query::term`,
/// `Query::terms`, ...); compound nodes come from [`BoolQuery`] and the filter
/// builders. Every node serializes to the request fragment the index service
/// expects for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Term(TermQuery),
    Terms(TermsQuery),
    Match(MatchQuery),
    MatchAll,
    QueryString(QueryStringQuery),
    Range(RangeQuery),
    /// A clause wrapped as `{"query": ...}`
    Wrapped(Box<Query>),
    Bool(BoolQuery),
    /// A single clause used as a filter
    Filter(Box<Query>),
    And(AndFilter),
    Or(OrFilter),
    Not(NotFilter),
    TermsFilter(TermsFilter),
}

impl Query {
    /// Exact term match, `{"term": {field: value}}`
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> TermQuery {
        TermQuery {
            field: field.into(),
            value: value.into(),
            boost: None,
        }
    }

    /// Match any of several exact terms
    pub fn terms<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> TermsQuery {
        TermsQuery {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
        }
    }

    /// Analyzed match query
    pub fn match_query(field: impl Into<String>, value: impl Into<Value>) -> MatchQuery {
        MatchQuery {
            field: field.into(),
            value: value.into(),
            boost: None,
        }
    }

    /// Query-string syntax (wildcards, boolean operators) over `fields`
    pub fn query_string<S: Into<String>>(
        query: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> QueryStringQuery {
        QueryStringQuery {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn match_all() -> Query {
        Query::MatchAll
    }

    /// Serialize this node to its request fragment
    pub fn to_json(&self) -> Value {
        match self {
            Query::Term(term) => term.to_json(),
            Query::Terms(terms) => terms.to_json(),
            Query::Match(query) => query.to_json(),
            Query::MatchAll => json!({ "match_all": {} }),
            Query::QueryString(query) => query.to_json(),
            Query::Range(range) => range.to_json(),
            Query::Wrapped(inner) => json!({ "query": inner.to_json() }),
            Query::Bool(query) => query.to_json(),
            Query::Filter(inner) => inner.to_json(),
            Query::And(filter) => filter.to_json(),
            Query::Or(filter) => filter.to_json(),
            Query::Not(filter) => filter.to_json(),
            Query::TermsFilter(filter) => filter.to_json(),
        }
    }

    /// Wrap into a fully-qualified `{"query": ...}` object.
    ///
    /// Needed when a bare clause such as `query_string` or `match` sits under a
    /// bool filter, which only accepts filters or query objects.
    pub fn query_wrap(self) -> Query {
        Query::Wrapped(Box::new(self))
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// `{field: value}` or, when boosted, `{field: {<value_key>: value, "boost": b}}`
fn field_clause(field: &str, value_key: &str, value: &Value, boost: Option<f32>) -> Value {
    let mut clause = Map::new();
    match boost {
        Some(boost) => {
            clause.insert(
                field.to_string(),
                json!({ value_key: value, "boost": boost }),
            );
        }
        None => {
            clause.insert(field.to_string(), value.clone());
        }
    }
    Value::Object(clause)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub value: Value,
    pub boost: Option<f32>,
}

impl TermQuery {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn query_wrap(self) -> Query {
        Query::from(self).query_wrap()
    }

    pub fn to_json(&self) -> Value {
        json!({ "term": field_clause(&self.field, "value", &self.value, self.boost) })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: String,
    pub values: Vec<Value>,
    pub boost: Option<f32>,
}

impl TermsQuery {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn query_wrap(self) -> Query {
        Query::from(self).query_wrap()
    }

    pub fn to_json(&self) -> Value {
        let mut clause = Map::new();
        clause.insert(self.field.clone(), Value::Array(self.values.clone()));
        if let Some(boost) = self.boost {
            clause.insert("boost".to_string(), json!(boost));
        }
        json!({ "terms": clause })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub field: String,
    pub value: Value,
    pub boost: Option<f32>,
}

impl MatchQuery {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn query_wrap(self) -> Query {
        Query::from(self).query_wrap()
    }

    pub fn to_json(&self) -> Value {
        json!({ "match": field_clause(&self.field, "query", &self.value, self.boost) })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryStringQuery {
    pub query: String,
    pub fields: Vec<String>,
}

impl QueryStringQuery {
    pub fn query_wrap(self) -> Query {
        Query::from(self).query_wrap()
    }

    pub fn to_json(&self) -> Value {
        let mut clause = Map::new();
        clause.insert("query".to_string(), json!(self.query));
        if !self.fields.is_empty() {
            clause.insert("fields".to_string(), json!(self.fields));
        }
        json!({ "query_string": clause })
    }
}

/// Range over a numeric or date field
///
/// ```
/// use genomic_search::query::RangeQuery;
///
/// let range = RangeQuery::new("start").gte(10_000).lte(10_050);
/// assert_eq!(
///     range.to_json(),
///     serde_json::json!({"range": {"start": {"gte": 10_000, "lte": 10_050}}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
    pub boost: Option<f32>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            boost: None,
        }
    }

    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.lte = Some(value.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn query_wrap(self) -> Query {
        Query::from(self).query_wrap()
    }

    pub fn to_json(&self) -> Value {
        let mut bounds = Map::new();
        let named = [
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
        ];
        for (name, bound) in named {
            if let Some(value) = bound {
                bounds.insert(name.to_string(), value.clone());
            }
        }
        if let Some(boost) = self.boost {
            bounds.insert("boost".to_string(), json!(boost));
        }

        let mut clause = Map::new();
        clause.insert(self.field.clone(), Value::Object(bounds));
        json!({ "range": clause })
    }
}

impl From<TermQuery> for Query {
    fn from(query: TermQuery) -> Self {
        Query::Term(query)
    }
}

impl From<TermsQuery> for Query {
    fn from(query: TermsQuery) -> Self {
        Query::Terms(query)
    }
}

impl From<MatchQuery> for Query {
    fn from(query: MatchQuery) -> Self {
        Query::Match(query)
    }
}

impl From<QueryStringQuery> for Query {
    fn from(query: QueryStringQuery) -> Self {
        Query::QueryString(query)
    }
}

impl From<RangeQuery> for Query {
    fn from(query: RangeQuery) -> Self {
        Query::Range(query)
    }
}
