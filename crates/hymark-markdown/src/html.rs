//! `pulldown-cmark` based HTML transformer.

use pulldown_cmark::{Event, Options, Parser};

use crate::heading::assign_heading_ids;
use crate::{TransformError, Transformer};

/// Markdown to HTML5 transformer.
///
/// Produces `pulldown-cmark`'s HTML with a slug `id` on every heading.
#[derive(Debug, Clone)]
pub struct HtmlTransformer {
    gfm: bool,
}

impl HtmlTransformer {
    /// Create a new transformer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl Default for HtmlTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for HtmlTransformer {
    fn transform(&self, markdown: &str) -> Result<String, TransformError> {
        let mut events: Vec<Event<'_>> =
            Parser::new_ext(markdown, self.parser_options()).collect();
        assign_heading_ids(&mut events);

        let mut html = String::with_capacity(markdown.len() + markdown.len() / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        Ok(html)
    }
}
