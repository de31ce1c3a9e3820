//! Schema (mapping) construction

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    Object,
    Nested,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
        }
    }
}

/// Index-analysis mode of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    Analyzed,
    NotAnalyzed,
    /// Stored but not searchable
    No,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Analyzed => "analyzed",
            IndexMode::NotAnalyzed => "not_analyzed",
            IndexMode::No => "no",
        }
    }
}

/// One field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub name: String,
    pub field_type: FieldType,
    pub index: Option<IndexMode>,
    /// Date format, e.g. `yyyy-MM-dd HH:mm:ss.SSS`
    pub format: Option<String>,
    /// Name of an analyzer defined in the schema settings
    pub analyzer: Option<String>,
}

impl FieldMapping {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            index: None,
            format: None,
            analyzer: None,
        }
    }

    pub fn index(mut self, mode: IndexMode) -> Self {
        self.index = Some(mode);
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.field_type.as_str()));
        if let Some(index) = self.index {
            property.insert("index".to_string(), json!(index.as_str()));
        }
        if let Some(ref format) = self.format {
            property.insert("format".to_string(), json!(format));
        }
        if let Some(ref analyzer) = self.analyzer {
            property.insert("analyzer".to_string(), json!(analyzer));
        }
        Value::Object(property)
    }
}

/// Custom analyzer: a tokenizer followed by a token filter chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyzer {
    pub name: String,
    pub tokenizer: String,
    pub filters: Vec<String>,
}

impl Analyzer {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        tokenizer: impl Into<String>,
        filters: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            tokenizer: tokenizer.into(),
            filters: filters.into_iter().map(Into::into).collect(),
        }
    }

    /// Whole-value, case-insensitive matching (`full_name`)
    pub fn keyword() -> Self {
        Self::new("full_name", "keyword", ["standard", "lowercase"])
    }
}

/// Ordered field declarations for one index type.
///
/// Declaration order is the column order used when loading.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingProperties {
    index_type: String,
    fields: Vec<FieldMapping>,
    analyzers: Vec<Analyzer>,
}

impl MappingProperties {
    pub fn new(index_type: impl Into<String>) -> Self {
        Self {
            index_type: index_type.into(),
            fields: Vec::new(),
            analyzers: Vec::new(),
        }
    }

    pub fn index_type(&self) -> &str {
        &self.index_type
    }

    /// Declare a field with a type and index mode
    pub fn add_property(
        self,
        name: impl Into<String>,
        field_type: FieldType,
        index: IndexMode,
    ) -> Self {
        self.add_field(FieldMapping::new(name, field_type).index(index))
    }

    /// Declare a field; redeclaring a name replaces it in place
    pub fn add_field(mut self, field: FieldMapping) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => {
                debug!(field = %field.name, "replacing field declaration");
                *existing = field;
            }
            None => self.fields.push(field),
        }
        self
    }

    /// Attach an analyzer to the schema settings
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// `{"analysis": {"analyzer": {...}}}`, when any analyzer is attached
    pub fn settings_json(&self) -> Option<Value> {
        if self.analyzers.is_empty() {
            return None;
        }
        let mut analyzers = Map::new();
        for analyzer in &self.analyzers {
            analyzers.insert(
                analyzer.name.clone(),
                json!({ "filter": analyzer.filters, "tokenizer": analyzer.tokenizer }),
            );
        }
        Some(json!({ "analysis": { "analyzer": analyzers } }))
    }

    /// The schema document submitted with `PUT /{index}`
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.to_json());
        }

        let mut mappings = Map::new();
        mappings.insert(
            self.index_type.clone(),
            json!({ "properties": properties }),
        );

        let mut schema = Map::new();
        schema.insert("mappings".to_string(), Value::Object(mappings));
        if let Some(settings) = self.settings_json() {
            schema.insert("settings".to_string(), settings);
        }
        Value::Object(schema)
    }
}
