//! Per-file context and layered defaults.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::options::keys;

/// Keys owned by the pipeline; neither front-matter nor `vars` may set them.
pub const RESERVED_KEYS: [&str; 2] = ["path", "content"];

/// Per-file record flowing through the pipeline stages.
///
/// Serializes as one flat object: `path`, `content` and every `data` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    /// Relative path; becomes the output path after transform.
    pub path: String,
    /// Body text (Markdown, then HTML).
    pub content: String,
    /// Front-matter attributes merged over the options layer.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Context {
    /// Create a context with no data.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            data: Map::new(),
        }
    }

    /// Non-empty string value of a data key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Effective engine identifier.
    #[must_use]
    pub fn engine(&self) -> Option<&str> {
        self.get_str(keys::ENGINE)
    }

    /// Effective template name.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.get_str(keys::TEMPLATE)
    }

    /// Effective template root directory.
    #[must_use]
    pub fn templates(&self) -> Option<&str> {
        self.get_str(keys::TEMPLATES)
    }

    /// Flat JSON object handed to template engines.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = self.data.clone();
        object.insert("path".to_owned(), Value::from(self.path.as_str()));
        object.insert("content".to_owned(), Value::from(self.content.as_str()));
        Value::Object(object)
    }
}

/// Copy into `dest` every key of `sources` that `dest` lacks.
///
/// Sources are applied in order, so an earlier source wins over a later one
/// and `dest` wins over all of them. Returns `dest`.
pub fn defaults<'a>(
    dest: &'a mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'a mut Map<String, Value> {
    for source in sources {
        for (key, value) in *source {
            if !dest.contains_key(key) {
                dest.insert(key.clone(), value.clone());
            }
        }
    }
    dest
}
