//! Engine lookup table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Engine, HandlebarsEngine, MiniJinjaEngine, TeraEngine};

/// Table from engine identifier to engine implementation.
///
/// Shared read-only across concurrent renders; wrap it in an `Arc` once per
/// run.
#[derive(Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn Engine>>,
}

impl EngineRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in engines.
    #[must_use]
    pub fn with_defaults() -> Self {
        let jinja: Arc<dyn Engine> = Arc::new(MiniJinjaEngine);
        let mut registry = Self::new();
        registry.register("minijinja", Arc::clone(&jinja));
        registry.register("jinja", jinja);
        registry.register("tera", Arc::new(TeraEngine));
        registry.register("handlebars", Arc::new(HandlebarsEngine::new()));
        registry
    }

    /// Register `engine` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, engine: Arc<dyn Engine>) {
        self.engines.insert(name.into(), engine);
    }

    /// Look up an engine by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Engine> {
        self.engines.get(name).map(|engine| engine.as_ref())
    }

    /// Check whether `name` is a registered identifier.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Registered identifiers in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::{EngineError, Template};

    struct Upper;

    impl Engine for Upper {
        fn render(&self, template: &Template<'_>, _context: &Value) -> Result<String, EngineError> {
            Ok(template.source.to_uppercase())
        }
    }

    #[test]
    fn test_defaults_registered() {
        let registry = EngineRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec!["handlebars", "jinja", "minijinja", "tera"]
        );
        assert!(registry.contains("handlebars"));
        assert!(!registry.contains("bogus engine"));
        assert!(registry.get("bogus engine").is_none());
    }

    #[test]
    fn test_register_custom_engine() {
        let mut registry = EngineRegistry::new();
        registry.register("upper", Arc::new(Upper));

        let template = Template {
            root: Path::new("."),
            name: "t",
            source: "abc",
        };
        let engine = registry.get("upper").unwrap();
        assert_eq!(engine.render(&template, &json!({})).unwrap(), "ABC");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = EngineRegistry::with_defaults();
        assert!(registry.get("Handlebars").is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = EngineRegistry::with_defaults();
        assert!(format!("{registry:?}").contains("tera"));
    }
}
