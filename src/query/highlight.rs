use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Highlight request for one or more fields
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub fields: Vec<String>,
    pub pre_tags: Option<String>,
    pub post_tags: Option<String>,
}

impl Highlight {
    /// Highlight a single field
    pub fn new(field: impl Into<String>) -> Self {
        Self::fields([field])
    }

    /// Highlight several fields
    pub fn fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            pre_tags: None,
            post_tags: None,
        }
    }

    /// Markup placed around each highlighted fragment
    pub fn tags(mut self, pre: impl Into<String>, post: impl Into<String>) -> Self {
        self.pre_tags = Some(pre.into());
        self.post_tags = Some(post.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        for field in &self.fields {
            fields.insert(field.clone(), json!({}));
        }

        let mut highlight = Map::new();
        highlight.insert("fields".to_string(), Value::Object(fields));
        if let Some(ref pre) = self.pre_tags {
            highlight.insert("pre_tags".to_string(), json!([pre]));
        }
        if let Some(ref post) = self.post_tags {
            highlight.insert("post_tags".to_string(), json!([post]));
        }
        Value::Object(highlight)
    }
}

impl Serialize for Highlight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
