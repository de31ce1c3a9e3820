//! Compound builders: bool queries and filters
//!
//! All append operations (`must`, `should`, `must_not`, `extend`) keep earlier
//! clauses and add new ones at the end, so serialization follows call order.

use crate::query::primitives::Query;
use serde_json::{json, Map, Value};

/// Boolean query with must/should/must_not clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a list of `must` clauses
    pub fn with_must_arr<Q: Into<Query>>(clauses: impl IntoIterator<Item = Q>) -> Self {
        Self::new().must_all(clauses)
    }

    pub fn must(mut self, clause: impl Into<Query>) -> Self {
        self.must.push(clause.into());
        self
    }

    pub fn must_all<Q: Into<Query>>(mut self, clauses: impl IntoIterator<Item = Q>) -> Self {
        self.must.extend(clauses.into_iter().map(Into::into));
        self
    }

    pub fn should(mut self, clause: impl Into<Query>) -> Self {
        self.should.push(clause.into());
        self
    }

    pub fn should_all<Q: Into<Query>>(mut self, clauses: impl IntoIterator<Item = Q>) -> Self {
        self.should.extend(clauses.into_iter().map(Into::into));
        self
    }

    pub fn must_not(mut self, clause: impl Into<Query>) -> Self {
        self.must_not.push(clause.into());
        self
    }

    pub fn must_not_all<Q: Into<Query>>(mut self, clauses: impl IntoIterator<Item = Q>) -> Self {
        self.must_not.extend(clauses.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let mut clause = Map::new();
        let occurrences = [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ];
        for (name, clauses) in occurrences {
            if !clauses.is_empty() {
                clause.insert(name.to_string(), serialize_all(clauses));
            }
        }
        json!({ "bool": clause })
    }
}

fn serialize_all(clauses: &[Query]) -> Value {
    Value::Array(clauses.iter().map(Query::to_json).collect())
}

/// A single clause used in filter position
pub struct Filter;

impl Filter {
    pub fn new(clause: impl Into<Query>) -> Query {
        Query::Filter(Box::new(clause.into()))
    }
}

/// `{"and": [...]}`: every clause must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndFilter {
    pub filters: Vec<Query>,
}

impl AndFilter {
    pub fn new(clause: impl Into<Query>) -> Self {
        Self {
            filters: vec![clause.into()],
        }
    }

    pub fn extend(mut self, clause: impl Into<Query>) -> Self {
        self.filters.push(clause.into());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({ "and": serialize_all(&self.filters) })
    }
}

/// `{"or": [...]}`: at least one clause must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrFilter {
    pub filters: Vec<Query>,
}

impl OrFilter {
    pub fn new(clause: impl Into<Query>) -> Self {
        Self {
            filters: vec![clause.into()],
        }
    }

    pub fn extend(mut self, clause: impl Into<Query>) -> Self {
        self.filters.push(clause.into());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({ "or": serialize_all(&self.filters) })
    }
}

/// `{"not": ...}`: excludes documents matching the clause
#[derive(Debug, Clone, PartialEq)]
pub struct NotFilter {
    pub filter: Box<Query>,
}

impl NotFilter {
    pub fn new(clause: impl Into<Query>) -> Self {
        Self {
            filter: Box::new(clause.into()),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "not": self.filter.to_json() })
    }
}

/// Terms filter with an optional execution mode (`plain`, `bool`, `and`, `or`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct TermsFilter {
    pub field: String,
    pub terms: Vec<Value>,
    pub execution: Option<String>,
}

impl TermsFilter {
    pub fn get_terms_filter<V: Into<Value>>(
        field: impl Into<String>,
        terms: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            field: field.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            execution: None,
        }
    }

    pub fn execution(mut self, mode: impl Into<String>) -> Self {
        self.execution = Some(mode.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut clause = Map::new();
        clause.insert(self.field.clone(), Value::Array(self.terms.clone()));
        if let Some(ref mode) = self.execution {
            clause.insert("execution".to_string(), json!(mode));
        }
        json!({ "terms": clause })
    }
}

impl From<BoolQuery> for Query {
    fn from(query: BoolQuery) -> Self {
        Query::Bool(query)
    }
}

impl From<AndFilter> for Query {
    fn from(filter: AndFilter) -> Self {
        Query::And(filter)
    }
}

impl From<OrFilter> for Query {
    fn from(filter: OrFilter) -> Self {
        Query::Or(filter)
    }
}

impl From<NotFilter> for Query {
    fn from(filter: NotFilter) -> Self {
        Query::Not(filter)
    }
}

impl From<TermsFilter> for Query {
    fn from(filter: TermsFilter) -> Self {
        Query::TermsFilter(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::primitives::RangeQuery;

    #[test]
    fn test_must_appends_in_call_order() {
        let a = Query::term("id", "rs1");
        let b = Query::term("id", "rs2");
        let query = BoolQuery::new().must(a.clone()).must(b.clone());

        assert_eq!(
            query.to_json(),
            json!({"bool": {"must": [a.to_json(), b.to_json()]}})
        );
    }

    #[test]
    fn test_repeated_clause_is_not_deduplicated() {
        let a = Query::term("seqid", 1);
        let query = BoolQuery::new().should(a.clone()).should(a.clone());
        assert_eq!(query.should.len(), 2);
    }

    #[test]
    fn test_bool_with_all_occurrences() {
        let query = BoolQuery::new()
            .must_all([Query::term("id", "rs373328635")])
            .must_not(Query::term("seqid", 2))
            .must_not_all([Query::term("seqid", "X"), Query::term("seqid", "Y")])
            .should(RangeQuery::new("start").gte(10054))
            .should_all([RangeQuery::new("start").gte(10050)]);

        assert_eq!(
            query.to_json(),
            json!({"bool": {
                "must": [{"term": {"id": "rs373328635"}}],
                "should": [
                    {"range": {"start": {"gte": 10054}}},
                    {"range": {"start": {"gte": 10050}}}
                ],
                "must_not": [
                    {"term": {"seqid": 2}},
                    {"term": {"seqid": "X"}},
                    {"term": {"seqid": "Y"}}
                ]
            }})
        );
    }

    #[test]
    fn test_empty_bool_has_no_clauses() {
        let query = BoolQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.to_json(), json!({"bool": {}}));
    }

    #[test]
    fn test_and_filter_extend() {
        let filter = AndFilter::new(BoolQuery::with_must_arr([RangeQuery::new("start").gte(1)]))
            .extend(RangeQuery::new("start").gte(1))
            .extend(Query::term("seqid", 1));

        assert_eq!(
            filter.to_json(),
            json!({"and": [
                {"bool": {"must": [{"range": {"start": {"gte": 1}}}]}},
                {"range": {"start": {"gte": 1}}},
                {"term": {"seqid": 1}}
            ]})
        );
    }

    #[test]
    fn test_or_filter_with_wrapped_query_string() {
        let filter = OrFilter::new(RangeQuery::new("start").gte(1).lte(100000))
            .extend(Query::query_string("rs*", ["id", "seqid"]).query_wrap());

        assert_eq!(
            filter.to_json(),
            json!({"or": [
                {"range": {"start": {"gte": 1, "lte": 100000}}},
                {"query": {"query_string": {"query": "rs*", "fields": ["id", "seqid"]}}}
            ]})
        );
    }

    #[test]
    fn test_not_filter() {
        let filter = NotFilter::new(RangeQuery::new("start").lte(10000));
        assert_eq!(
            filter.to_json(),
            json!({"not": {"range": {"start": {"lte": 10000}}}})
        );
    }

    #[test]
    fn test_terms_filter() {
        let filter = TermsFilter::get_terms_filter("id", ["rs2476601", "rs373328635"]);
        assert_eq!(
            filter.to_json(),
            json!({"terms": {"id": ["rs2476601", "rs373328635"]}})
        );

        let filter = filter.execution("bool");
        assert_eq!(filter.to_json()["terms"]["execution"], json!("bool"));
    }

    #[test]
    fn test_filter_serializes_as_its_clause() {
        let filter = Filter::new(Query::term("id", "rs1"));
        assert_eq!(filter.to_json(), json!({"term": {"id": "rs1"}}));
    }
}
