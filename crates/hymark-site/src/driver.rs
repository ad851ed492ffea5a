//! Bounded fan-out over discovered files.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::{BuildError, Pipeline, discover};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of files written.
    pub written: usize,
}

/// Drive `task` over `items` with at most `limit` futures in flight.
///
/// All futures run on the calling task. After the first error no new item is
/// started; futures already in flight are drained, then the first error is
/// returned. Returns the number of items that completed successfully.
///
/// # Errors
///
/// Returns the first error produced by `task`.
pub async fn for_each_bounded<I, F, Fut, E>(items: I, limit: usize, mut task: F) -> Result<usize, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let limit = limit.max(1);
    let mut pending = items.into_iter();
    let mut in_flight = FuturesUnordered::new();
    let mut completed = 0;
    let mut first_error: Option<E> = None;

    loop {
        while first_error.is_none() && in_flight.len() < limit {
            let Some(item) = pending.next() else {
                break;
            };
            in_flight.push(task(item));
        }

        let Some(result) = in_flight.next().await else {
            break;
        };
        match result {
            Ok(()) => completed += 1,
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => tracing::warn!(error = %e, "Additional failure while draining"),
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(completed),
    }
}

impl Pipeline {
    /// Process every path in `paths`, at most `concurrency` at a time.
    ///
    /// # Errors
    ///
    /// Returns the first failing file's error once in-flight files have
    /// finished. Files that completed before the failure stay written.
    pub async fn run<I>(&self, paths: I) -> Result<RunSummary, BuildError>
    where
        I: IntoIterator<Item = String>,
    {
        let started = Instant::now();
        let written = for_each_bounded(paths, self.options().concurrency, |path| async move {
            self.process(&path).await
        })
        .await?;
        tracing::info!(
            files = written,
            elapsed_ms = started.elapsed().as_millis(),
            "Build completed"
        );
        Ok(RunSummary { written })
    }

    /// Discover sources under the input root and process them all.
    ///
    /// # Errors
    ///
    /// Returns a discovery error before anything is processed, otherwise the
    /// first failing file's error.
    pub async fn build(&self) -> Result<RunSummary, BuildError> {
        let paths = discover(&self.options().input, &self.options().patterns)?;
        tracing::info!(
            input = %self.options().input.display(),
            files = paths.len(),
            "Building"
        );
        self.run(paths).await
    }
}
