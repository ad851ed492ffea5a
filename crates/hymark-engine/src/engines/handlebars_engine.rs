//! Handlebars adapter.

use handlebars::Handlebars;
use serde_json::Value;

use crate::{Engine, EngineError, Template};

const NAME: &str = "handlebars";

/// Handlebars templates.
///
/// `{{name}}` is HTML-escaped and `{{{name}}}` is inserted raw. Missing
/// variables render as empty strings.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Create an engine with the default (non-strict) registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Handlebars::new(),
        }
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HandlebarsEngine {
    fn render(&self, template: &Template<'_>, context: &Value) -> Result<String, EngineError> {
        self.registry
            .render_template(template.source, context)
            .map_err(|e| EngineError::from_source(NAME, &e))
    }
}
