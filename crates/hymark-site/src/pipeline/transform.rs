//! Transform stage: Markdown to HTML.

use crate::path::markdown_output_path;
use crate::{BuildError, Context};

use super::Pipeline;

impl Pipeline {
    /// Convert a Markdown context to HTML and rename it to `.html`.
    ///
    /// Contexts whose path is not `.md`/`.markdown` (case-insensitive) are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Transform`] if conversion fails.
    pub async fn transform(&self, mut ctx: Context) -> Result<Context, BuildError> {
        tokio::task::yield_now().await;

        let Some(html_path) = markdown_output_path(&ctx.path) else {
            return Ok(ctx);
        };
        ctx.content =
            self.transformer
                .transform(&ctx.content)
                .map_err(|source| BuildError::Transform {
                    path: ctx.path.clone(),
                    source,
                })?;
        tracing::debug!(from = %ctx.path, to = %html_path, "Transformed Markdown");
        ctx.path = html_path;
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use hymark_markdown::{TransformError, Transformer};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::Options;

    struct Broken;

    impl Transformer for Broken {
        fn transform(&self, _markdown: &str) -> Result<String, TransformError> {
            Err(TransformError::Malformed("unbalanced input".to_owned()))
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Options::new("src", "dist"))
    }

    #[tokio::test]
    async fn test_transform_markdown() {
        let ctx = pipeline()
            .transform(Context::new("foo.md", "# bar"))
            .await
            .unwrap();

        assert_eq!(ctx.path, "foo.html");
        assert_eq!(ctx.content, "<h1 id=\"bar\">bar</h1>\n");
    }

    #[tokio::test]
    async fn test_transform_keeps_data() {
        let mut ctx = Context::new("a/B.MARKDOWN", "text");
        ctx.data.insert("title".to_owned(), json!("T"));

        let ctx = pipeline().transform(ctx).await.unwrap();

        assert_eq!(ctx.path, "a/B.html");
        assert_eq!(ctx.data.get("title"), Some(&json!("T")));
    }

    #[tokio::test]
    async fn test_transform_skips_non_markdown() {
        let original = Context::new("foo.html", "# bar");

        let ctx = pipeline().transform(original.clone()).await.unwrap();

        assert_eq!(ctx, original);
    }

    #[tokio::test]
    async fn test_transform_nul_byte_is_not_an_error() {
        let ctx = pipeline()
            .transform(Context::new("a.md", "hello\0world\n"))
            .await
            .unwrap();

        assert_eq!(ctx.path, "a.html");
        assert!(ctx.content.contains("world"));
    }

    #[tokio::test]
    async fn test_transform_error_names_file() {
        let err = pipeline()
            .with_transformer(Broken)
            .transform(Context::new("bad.md", "text"))
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::Transform { .. }));
        assert!(err.to_string().contains("bad.md"));
        assert!(err.to_string().contains("unbalanced input"));
    }
}
