//! Read stage: source file to context.

use crate::context::RESERVED_KEYS;
use crate::path::check_relative;
use crate::{BuildError, Context, defaults};

use super::Pipeline;

impl Pipeline {
    /// Read `relative_path` under the input root and build its context.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsafePath`] for a path outside the input root,
    /// [`BuildError::FileRead`] if the file cannot be read and
    /// [`BuildError::FrontMatter`] for a malformed front-matter block.
    pub async fn read(&self, relative_path: &str) -> Result<Context, BuildError> {
        let file = self.options.input.join(check_relative(relative_path)?);
        let bytes = tokio::fs::read(&file)
            .await
            .map_err(|source| BuildError::FileRead {
                path: file.clone(),
                source,
            })?;
        tracing::debug!(path = %relative_path, bytes = bytes.len(), "Read source");
        // Invalid UTF-8 is replaced, not rejected.
        self.context_from_source(relative_path, &String::from_utf8_lossy(&bytes))
    }

    /// Build a context from source text without touching the filesystem.
    ///
    /// Front-matter attributes win over the options layer, which wins over
    /// `vars`. The reserved keys `path` and `content` are never taken from
    /// front-matter or `vars`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::FrontMatter`] for a malformed front-matter block.
    pub fn context_from_source(&self, path: &str, source: &str) -> Result<Context, BuildError> {
        let front = hymark_meta::parse(source).map_err(|source| BuildError::FrontMatter {
            path: path.to_owned(),
            source,
        })?;

        let mut ctx = Context::new(path, front.body);
        ctx.data = front.attributes;
        for key in RESERVED_KEYS {
            ctx.data.remove(key);
        }
        defaults(&mut ctx.data, &[&self.globals]);
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::super::tests::{Fixture, HELLO};
    use super::*;
    use crate::Options;

    #[tokio::test]
    async fn test_read_front_matter_and_body() {
        let fixture = Fixture::new();
        fixture.source("hello.md", HELLO);
        let pipeline = Pipeline::new(fixture.options());

        let ctx = pipeline.read("hello.md").await.unwrap();

        assert_eq!(ctx.path, "hello.md");
        assert_eq!(ctx.content, "\n# hello\n");
        assert_eq!(ctx.data.get("title"), Some(&json!("Hello World")));
        assert_eq!(ctx.template(), Some("page.html"));
    }

    #[tokio::test]
    async fn test_read_precedence() {
        let fixture = Fixture::new();
        fixture.source(
            "a.md",
            "---\ntemplate: b.html\npath: evil\ncontent: evil\n---\nbody",
        );
        let mut vars = serde_json::Map::new();
        vars.insert("template".to_owned(), json!("c.html"));
        vars.insert("site".to_owned(), json!("Docs"));
        let pipeline = Pipeline::new(Options {
            template: Some("a.html".to_owned()),
            vars,
            ..fixture.options()
        });

        let ctx = pipeline.read("a.md").await.unwrap();

        assert_eq!(ctx.template(), Some("b.html"));
        assert_eq!(ctx.path, "a.md");
        assert_eq!(ctx.content, "body");
        assert!(!ctx.data.contains_key("path"));
        assert!(!ctx.data.contains_key("content"));
        assert_eq!(ctx.data.get("site"), Some(&json!("Docs")));
    }

    #[tokio::test]
    async fn test_read_options_layer_over_vars() {
        let fixture = Fixture::new();
        fixture.source("a.md", "plain");
        let mut vars = serde_json::Map::new();
        vars.insert("template".to_owned(), json!("c.html"));
        let pipeline = Pipeline::new(Options {
            template: Some("a.html".to_owned()),
            vars,
            ..fixture.options()
        });

        let ctx = pipeline.read("a.md").await.unwrap();

        assert_eq!(ctx.template(), Some("a.html"));
        assert_eq!(ctx.content, "plain");
    }

    #[tokio::test]
    async fn test_read_exposes_input_and_output() {
        let fixture = Fixture::new();
        fixture.source("a.md", "x");
        let pipeline = Pipeline::new(fixture.options());

        let ctx = pipeline.read("a.md").await.unwrap();

        let input = fixture.input.to_string_lossy().into_owned();
        assert_eq!(ctx.data.get("input"), Some(&Value::String(input)));
        assert!(ctx.data.contains_key("output"));
        assert!(ctx.data.contains_key("match"));
    }

    #[tokio::test]
    async fn test_read_reserved_keys_from_vars_ignored() {
        let fixture = Fixture::new();
        fixture.source("a.html", "body");
        let mut vars = serde_json::Map::new();
        vars.insert("path".to_owned(), json!("evil"));
        vars.insert("content".to_owned(), json!("evil"));
        let pipeline = Pipeline::new(Options {
            vars,
            ..fixture.options()
        });

        let ctx = pipeline.read("a.html").await.unwrap();

        assert!(!ctx.data.contains_key("path"));
        assert!(!ctx.data.contains_key("content"));
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json.matches("\"path\"").count(), 1);
        assert!(!json.contains("evil"));
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_is_replaced() {
        let fixture = Fixture::new();
        std::fs::write(fixture.input.join("legacy.html"), b"caf\xe9").unwrap();
        let pipeline = Pipeline::new(fixture.options());

        let ctx = pipeline.read("legacy.html").await.unwrap();

        assert_eq!(ctx.content, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let fixture = Fixture::new();
        let pipeline = Pipeline::new(fixture.options());

        let err = pipeline.read("missing.md").await.unwrap_err();

        assert!(matches!(err, BuildError::FileRead { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[tokio::test]
    async fn test_read_rejects_escaping_path() {
        let fixture = Fixture::new();
        let pipeline = Pipeline::new(fixture.options());

        let err = pipeline.read("../secret.md").await.unwrap_err();

        assert!(matches!(err, BuildError::UnsafePath(_)));
    }

    #[tokio::test]
    async fn test_read_malformed_front_matter() {
        let fixture = Fixture::new();
        fixture.source("bad.md", "---\ntitle: [unclosed\n---\nbody");
        let pipeline = Pipeline::new(fixture.options());

        let err = pipeline.read("bad.md").await.unwrap_err();

        assert!(matches!(err, BuildError::FrontMatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }
}
