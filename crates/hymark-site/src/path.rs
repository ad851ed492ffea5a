//! Relative path helpers.

use std::path::{Component, Path};

use crate::BuildError;

/// Check that `path` is relative and cannot climb out of its root.
pub(crate) fn check_relative(path: &str) -> Result<&Path, BuildError> {
    let candidate = Path::new(path);
    let safe = !path.is_empty()
        && candidate
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if safe {
        Ok(candidate)
    } else {
        Err(BuildError::UnsafePath(path.to_owned()))
    }
}

/// Output path for a Markdown source, or `None` if `path` is not Markdown.
///
/// The extension check is case-insensitive; only the final extension is
/// replaced.
pub(crate) fn markdown_output_path(path: &str) -> Option<String> {
    let (stem, extension) = path.rsplit_once('.')?;
    if stem.is_empty() || stem.ends_with('/') {
        return None;
    }
    let markdown =
        extension.eq_ignore_ascii_case("md") || extension.eq_ignore_ascii_case("markdown");
    markdown.then(|| format!("{stem}.html"))
}
