//! Build error type.

use std::io;
use std::path::PathBuf;

use hymark_engine::EngineError;
use hymark_markdown::TransformError;
use hymark_meta::FrontMatterError;

/// Error returned by discovery or by a per-file pipeline stage.
///
/// Every variant names the file (or directory) it concerns, so a single
/// error is enough to tell the user what went wrong and where.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Input root does not exist or is not a directory.
    #[error("Bad input directory: {}", .0.display())]
    BadInputDirectory(PathBuf),

    /// A match pattern is not a valid glob.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The input root could not be listed.
    #[error("Failed to scan {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A relative path is absolute or climbs out of its root.
    #[error("Unsafe path '{0}': must be relative and stay inside its root")]
    UnsafePath(String),

    /// Source (or template) file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Front-matter block is malformed.
    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: String,
        #[source]
        source: FrontMatterError,
    },

    /// Markdown conversion failed.
    #[error("Failed to transform {path}: {source}")]
    Transform {
        path: String,
        #[source]
        source: TransformError,
    },

    /// Engine identifier is not registered.
    #[error("Unsupported engine '{engine}' for {path}")]
    UnsupportedEngine { engine: String, path: String },

    /// An engine is configured but no templates directory is.
    #[error("No templates directory configured for {path}")]
    MissingTemplatesPath { path: String },

    /// Resolved template file does not exist.
    #[error("Template not found: {} (rendering {path})", .template.display())]
    TemplateNotFound { template: PathBuf, path: String },

    /// Engine failed to render.
    #[error("Failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: EngineError,
    },

    /// Output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
