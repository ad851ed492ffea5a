//! Tera adapter.

use serde_json::Value;
use tera::{Context, Tera};

use crate::{Engine, EngineError, Template};

const NAME: &str = "tera";

/// Tera templates rendered as one-off templates without auto-escaping.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraEngine;

impl Engine for TeraEngine {
    fn render(&self, template: &Template<'_>, context: &Value) -> Result<String, EngineError> {
        let context =
            Context::from_value(context.clone()).map_err(|e| EngineError::from_source(NAME, &e))?;
        Tera::one_off(template.source, &context, false)
            .map_err(|e| EngineError::from_source(NAME, &e))
    }
}
