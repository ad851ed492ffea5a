//! MiniJinja adapter.

use minijinja::{AutoEscape, Environment, path_loader};
use serde_json::Value;

use crate::{Engine, EngineError, Template};

const NAME: &str = "minijinja";

/// Jinja2-style templates rendered with MiniJinja.
///
/// Templates are rendered without auto-escaping, so `{{ content }}` inserts
/// the page HTML as is. `{% include %}` and `{% extends %}` resolve names
/// against the template root.
#[derive(Debug, Default, Clone, Copy)]
pub struct MiniJinjaEngine;

impl Engine for MiniJinjaEngine {
    fn render(&self, template: &Template<'_>, context: &Value) -> Result<String, EngineError> {
        let mut env = Environment::new();
        env.set_loader(path_loader(template.root.to_path_buf()));
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.render_named_str(template.name, template.source, context)
            .map_err(|e| EngineError::from_source(NAME, &e))
    }
}
