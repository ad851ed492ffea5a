//! Global build options.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::context::RESERVED_KEYS;

/// Default match patterns: Markdown and HTML anywhere, minus `_`-prefixed
/// files and directories.
pub const DEFAULT_PATTERNS: [&str; 4] = ["**/*.md", "**/*.markdown", "**/*.html", "!**/_*"];

/// Default number of pipelines in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 64;

/// Context keys filled from the options layer.
pub(crate) mod keys {
    pub const ENGINE: &str = "engine";
    pub const TEMPLATE: &str = "template";
    pub const TEMPLATES: &str = "templates";
    pub const INPUT: &str = "input";
    pub const OUTPUT: &str = "output";
    pub const MATCH: &str = "match";
}

/// Read-only options shared by every pipeline of a run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Input root directory.
    pub input: PathBuf,
    /// Output root directory.
    pub output: PathBuf,
    /// Template root directory.
    pub templates: Option<PathBuf>,
    /// Ordered include/exclude glob patterns (`!` prefix excludes).
    pub patterns: Vec<String>,
    /// Default engine identifier.
    pub engine: Option<String>,
    /// Default template name, relative to `templates`.
    pub template: Option<String>,
    /// Maximum number of pipelines in flight.
    pub concurrency: usize,
    /// Extra global context data, below every other layer.
    pub vars: Map<String, Value>,
}

impl Options {
    /// Create options with default patterns and concurrency and no engine.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            templates: None,
            patterns: DEFAULT_PATTERNS.iter().map(|p| (*p).to_owned()).collect(),
            engine: None,
            template: None,
            concurrency: DEFAULT_CONCURRENCY,
            vars: Map::new(),
        }
    }

    /// The options layer of a context: every set option under its context
    /// key, followed by `vars` for keys not already present. Reserved keys
    /// are dropped.
    #[must_use]
    pub fn context_defaults(&self) -> Map<String, Value> {
        let mut layer = Map::new();
        if let Some(engine) = &self.engine {
            layer.insert(keys::ENGINE.to_owned(), Value::from(engine.as_str()));
        }
        if let Some(template) = &self.template {
            layer.insert(keys::TEMPLATE.to_owned(), Value::from(template.as_str()));
        }
        if let Some(templates) = &self.templates {
            layer.insert(keys::TEMPLATES.to_owned(), path_value(templates));
        }
        layer.insert(keys::INPUT.to_owned(), path_value(&self.input));
        layer.insert(keys::OUTPUT.to_owned(), path_value(&self.output));
        layer.insert(
            keys::MATCH.to_owned(),
            Value::Array(self.patterns.iter().map(|p| Value::from(p.as_str())).collect()),
        );

        crate::context::defaults(&mut layer, &[&self.vars]);
        for key in RESERVED_KEYS {
            layer.remove(key);
        }
        layer
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}
