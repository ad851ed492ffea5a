//! Static-site build pipeline for hymark.
//!
//! Discovers source files under an input directory, then runs each one
//! through four stages:
//!
//! 1. **read**: load the file and split off YAML front-matter
//! 2. **transform**: convert Markdown to HTML (`.md`/`.markdown` only)
//! 3. **render**: apply the configured template engine, if any
//! 4. **write**: store the result under the output directory
//!
//! Files are processed concurrently with a bounded number in flight. The
//! first failure stops new files from starting; the run then reports that
//! failure once in-flight files finish.
//!
//! ```no_run
//! use hymark_site::{Options, Pipeline};
//!
//! # async fn example() -> Result<(), hymark_site::BuildError> {
//! let options = Options {
//!     engine: Some("handlebars".to_owned()),
//!     template: Some("page.html".to_owned()),
//!     templates: Some("templates".into()),
//!     ..Options::new("src", "dist")
//! };
//! let summary = Pipeline::new(options).build().await?;
//! println!("{} files written", summary.written);
//! # Ok(())
//! # }
//! ```

mod context;
mod discover;
mod driver;
mod error;
mod options;
mod path;
mod pipeline;

pub use context::{Context, RESERVED_KEYS, defaults};
pub use discover::discover;
pub use driver::{RunSummary, for_each_bounded};
pub use error::BuildError;
pub use options::{DEFAULT_CONCURRENCY, DEFAULT_PATTERNS, Options};
pub use pipeline::Pipeline;
