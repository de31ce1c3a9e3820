//! Delimited line to typed document conversion

use crate::loader::attributes::{
    parse_attributes, Attributes, GFF_KEY_VALUE_DELIMITER, GTF_KEY_VALUE_DELIMITER,
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// How the last column of a row is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeMode {
    /// Every column is a scalar
    #[default]
    None,
    /// Last column holds GFF3 `key=value;` attributes
    Gff,
    /// Last column holds GTF `key value;` attributes
    Gtf,
}

impl AttributeMode {
    pub fn from_flags(is_gff: bool, is_gtf: bool) -> Self {
        // GTF wins when both are set.
        match (is_gff, is_gtf) {
            (_, true) => AttributeMode::Gtf,
            (true, false) => AttributeMode::Gff,
            (false, false) => AttributeMode::None,
        }
    }

    fn key_value_delimiter(self) -> Option<&'static str> {
        match self {
            AttributeMode::None => None,
            AttributeMode::Gff => Some(GFF_KEY_VALUE_DELIMITER),
            AttributeMode::Gtf => Some(GTF_KEY_VALUE_DELIMITER),
        }
    }
}

/// A typed document field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
    Text(String),
    Attributes(Attributes),
}

/// Best-effort type inference for one token.
///
/// A non-negative integer literal becomes `Integer`, anything else that parses
/// as a finite number becomes `Float`, and the rest stays `Text`.
pub fn infer_value(token: &str) -> FieldValue {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = token.parse::<u64>() {
            return FieldValue::Integer(n);
        }
    }
    match token.parse::<f64>() {
        Ok(f) if f.is_finite() => FieldValue::Float(f),
        _ => FieldValue::Text(token.to_string()),
    }
}

/// One document, fields in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Convert one raw line into a document.
///
/// Returns `None` for comment/header lines (leading `#`) and for lines whose
/// field count differs from `columns`. Trailing whitespace is stripped first.
pub fn transcode_line(
    line: &str,
    columns: &[String],
    delimiter: &str,
    mode: AttributeMode,
) -> Option<Document> {
    let line = line.trim_end();
    if line.starts_with('#') {
        return None;
    }

    let parts: Vec<&str> = line.split(delimiter).collect();
    if parts.len() != columns.len() {
        return None;
    }

    let last = parts.len() - 1;
    let mut document = Document::new();
    for (idx, (name, part)) in columns.iter().zip(parts).enumerate() {
        let value = match mode.key_value_delimiter() {
            Some(kv) if idx == last => FieldValue::Attributes(parse_attributes(part, kv)),
            _ => infer_value(part),
        };
        document.push(name.clone(), value);
    }

    Some(document)
}
