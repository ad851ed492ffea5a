//! Per-file build pipeline: read, transform, render, write.
//!
//! A [`Pipeline`] owns everything a run shares read-only (options, engines,
//! Markdown transformer) and processes one relative path at a time. Many
//! files may be in flight at once; stages never touch shared mutable state,
//! so interleaving is safe. Each stage yields to the scheduler at least once.

mod read;
mod render;
mod transform;
mod write;

use hymark_engine::EngineRegistry;
use hymark_markdown::{HtmlTransformer, Transformer};
use serde_json::{Map, Value};

use crate::{BuildError, Options};

/// Shared state for processing source files.
pub struct Pipeline {
    options: Options,
    /// Options layer merged with `vars`, computed once per run.
    globals: Map<String, Value>,
    engines: EngineRegistry,
    transformer: Box<dyn Transformer>,
}

impl Pipeline {
    /// Create a pipeline with the built-in engines and the default
    /// Markdown transformer.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            globals: options.context_defaults(),
            options,
            engines: EngineRegistry::with_defaults(),
            transformer: Box::new(HtmlTransformer::new()),
        }
    }

    /// Replace the engine registry.
    #[must_use]
    pub fn with_engines(mut self, engines: EngineRegistry) -> Self {
        self.engines = engines;
        self
    }

    /// Replace the Markdown transformer.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    /// Options this pipeline was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Engine registry in use.
    #[must_use]
    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    /// Run all four stages for one source file.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; nothing is written for this file.
    pub async fn process(&self, relative_path: &str) -> Result<(), BuildError> {
        let ctx = self.read(relative_path).await?;
        let ctx = self.transform(ctx).await?;
        let (output, ctx) = self.render(ctx).await?;
        self.write(&output, &ctx).await
    }

    /// Run transform and render on in-memory source text and return the
    /// rendered output.
    ///
    /// `name` stands in for the relative path: it decides whether the text
    /// is treated as Markdown and is exposed to templates as `path`.
    ///
    /// # Errors
    ///
    /// Returns the first stage error.
    pub async fn render_source(&self, name: &str, source: &str) -> Result<String, BuildError> {
        let ctx = self.context_from_source(name, source)?;
        let ctx = self.transform(ctx).await?;
        let (output, _) = self.render(ctx).await?;
        Ok(output)
    }
}
