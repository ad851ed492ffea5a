//! Render stage: apply the context's template engine.

use std::io::ErrorKind;
use std::path::Path;

use hymark_engine::Template;
use serde_json::Value;

use crate::options::keys;
use crate::path::check_relative;
use crate::{BuildError, Context};

use super::Pipeline;

impl Pipeline {
    /// Render `ctx` through its engine and template.
    ///
    /// Without both an engine and a template the output is the content
    /// unchanged. Otherwise the template is read from the templates
    /// directory and rendered with the whole context as data.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsupportedEngine`] for an unknown or non-string
    /// engine,
    /// [`BuildError::MissingTemplatesPath`] when no templates directory is
    /// set, [`BuildError::TemplateNotFound`] when the template file does not
    /// exist and [`BuildError::Render`] when the engine fails.
    pub async fn render(&self, ctx: Context) -> Result<(String, Context), BuildError> {
        let (Some(engine_name), Some(template)) = (
            engine_name(&ctx),
            ctx.template().map(str::to_owned),
        ) else {
            tokio::task::yield_now().await;
            return Ok((ctx.content.clone(), ctx));
        };

        let engine = engine_name
            .as_deref()
            .ok()
            .and_then(|name| self.engines.get(name));
        let (Ok(engine_name) | Err(engine_name)) = engine_name;
        let engine = engine.ok_or_else(|| BuildError::UnsupportedEngine {
            engine: engine_name.clone(),
            path: ctx.path.clone(),
        })?;
        let templates = ctx
            .templates()
            .ok_or_else(|| BuildError::MissingTemplatesPath {
                path: ctx.path.clone(),
            })?;
        let root = Path::new(templates);
        let resolved = root.join(check_relative(&template)?);

        let source = match tokio::fs::read_to_string(&resolved).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BuildError::TemplateNotFound {
                    template: resolved,
                    path: ctx.path.clone(),
                });
            }
            Err(source) => {
                return Err(BuildError::FileRead {
                    path: resolved,
                    source,
                });
            }
        };

        let template = Template {
            root,
            name: &template,
            source: &source,
        };
        let output = engine
            .render(&template, &ctx.to_value())
            .map_err(|source| BuildError::Render {
                path: ctx.path.clone(),
                source,
            })?;
        tracing::debug!(path = %ctx.path, engine = %engine_name, template = %resolved.display(), "Rendered");
        Ok((output, ctx))
    }
}

/// Engine identifier of `ctx`, or `Err` with the raw JSON text when the
/// engine is set to something other than a string.
fn engine_name(ctx: &Context) -> Option<Result<String, String>> {
    match ctx.data.get(keys::ENGINE) {
        None | Some(Value::Null) => None,
        Some(Value::String(_)) => ctx.engine().map(|name| Ok(name.to_owned())),
        Some(other) => Some(Err(other.to_string())),
    }
}
