//! Write stage: rendered output to the output root.

use crate::path::check_relative;
use crate::{BuildError, Context};

use super::Pipeline;

impl Pipeline {
    /// Write `output` to the context's path under the output root, creating
    /// parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsafePath`] for a path outside the output root
    /// and [`BuildError::Write`] if a directory or the file cannot be written.
    pub async fn write(&self, output: &str, ctx: &Context) -> Result<(), BuildError> {
        let dest = self.options.output.join(check_relative(&ctx.path)?);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| BuildError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&dest, output)
            .await
            .map_err(|source| BuildError::Write {
                path: dest.clone(),
                source,
            })?;
        tracing::debug!(path = %dest.display(), bytes = output.len(), "Wrote output");
        Ok(())
    }
}
