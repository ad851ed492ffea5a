//! Pluggable template engines for hymark.
//!
//! An [`Engine`] turns template source plus a JSON context into a string.
//! Engines are looked up by identifier in an [`EngineRegistry`]; an unknown
//! identifier is simply absent from the registry, so callers decide how to
//! report it.
//!
//! Built-in engines (see [`EngineRegistry::with_defaults`]):
//!
//! | Identifier | Engine |
//! |---|---|
//! | `minijinja`, `jinja` | [`MiniJinjaEngine`] |
//! | `tera` | [`TeraEngine`] |
//! | `handlebars` | [`HandlebarsEngine`] |

mod engines;
mod registry;

use std::path::Path;

use serde_json::Value;

pub use engines::{HandlebarsEngine, MiniJinjaEngine, TeraEngine};
pub use registry::EngineRegistry;

/// A template ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    /// Template root directory (used to resolve includes where supported).
    pub root: &'a Path,
    /// Template name relative to `root`.
    pub name: &'a str,
    /// Template source text.
    pub source: &'a str,
}

/// Template rendering capability.
pub trait Engine: Send + Sync {
    /// Render `template` with `context` as the data binding.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the template fails to compile or render.
    fn render(&self, template: &Template<'_>, context: &Value) -> Result<String, EngineError>;
}

/// Error returned by a template engine.
#[derive(Debug, thiserror::Error)]
#[error("{engine}: {message}")]
pub struct EngineError {
    /// Engine identifier.
    pub engine: &'static str,
    /// Engine-provided message, including its cause chain.
    pub message: String,
}

impl EngineError {
    /// Build an error from an engine failure, flattening its source chain.
    pub(crate) fn from_source(engine: &'static str, err: &dyn std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self { engine, message }
    }
}
