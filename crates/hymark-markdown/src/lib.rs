//! Markdown to HTML transformation for hymark.
//!
//! The pipeline only depends on the [`Transformer`] trait, so the conversion
//! can be swapped out (or made to fail on demand in tests). [`HtmlTransformer`]
//! is the default implementation built on `pulldown-cmark`:
//!
//! ```
//! use hymark_markdown::{HtmlTransformer, Transformer};
//!
//! let html = HtmlTransformer::new().transform("# bar\n").unwrap();
//! assert_eq!(html, "<h1 id=\"bar\">bar</h1>\n");
//! ```

mod heading;
mod html;

pub use heading::slugify;
pub use html::HtmlTransformer;

/// Converts Markdown text to HTML.
///
/// Implementations must be pure: the same input always yields the same
/// output, and no state is shared between calls.
pub trait Transformer: Send + Sync {
    /// Convert `markdown` to an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] if the input cannot be converted.
    fn transform(&self, markdown: &str) -> Result<String, TransformError>;
}

/// Error returned when Markdown conversion fails.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Transformer-specific failure.
    #[error("{0}")]
    Malformed(String),
}
