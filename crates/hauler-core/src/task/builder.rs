//! Fluent entry point for assembling a task.

use crate::task::adapter::FileLenResolver;
use crate::task::descriptor::{DownloadTask, Protocol};
use crate::task::http::HttpOptions;
use crate::task::stream::StreamOptions;
use crate::task::BuildError;

/// Builds one [`DownloadTask`].
///
/// Setters chain by value and fallible ones return `Result<Self>`, so a
/// whole configuration reads as one expression:
///
/// ```
/// use hauler_core::task::TaskBuilder;
///
/// # fn demo() -> Result<(), hauler_core::task::BuildError> {
/// let task = TaskBuilder::http("https://example.com/game.zip")?
///     .file_path("/tmp/game.zip")?
///     .use_server_file_name(true)
///     .finish();
/// # Ok(())
/// # }
/// ```
///
/// `finish` consumes the builder; a finished task cannot be reconfigured
/// through it, there is simply no builder left to call.
#[derive(Debug)]
pub struct TaskBuilder {
    task: DownloadTask,
}

impl TaskBuilder {
    /// Start a plain-HTTP task for `url`.
    pub fn http(url: impl Into<String>) -> Result<Self, BuildError> {
        Ok(Self {
            task: DownloadTask::new(Protocol::Http, url.into())?,
        })
    }

    /// Start a segmented-stream (HLS manifest) task for `url`.
    pub fn hls(url: impl Into<String>) -> Result<Self, BuildError> {
        Ok(Self {
            task: DownloadTask::new(Protocol::Hls, url.into())?,
        })
    }

    /// Set the destination file path. The path must name a file, not a
    /// directory; to rename a download, set a new path with the new file
    /// name. Recording a path does not start anything.
    pub fn file_path(mut self, path: &str) -> Result<Self, BuildError> {
        self.task.set_dest_path(path)?;
        Ok(self)
    }

    /// Set the destination file path and the overwrite flag in one call.
    /// With `force` true the engine will not reject the task because the
    /// destination is already taken.
    pub fn file_path_force(mut self, path: &str, force: bool) -> Result<Self, BuildError> {
        self.task.set_dest_path(path)?;
        self.task.set_force_overwrite(force);
        Ok(self)
    }

    /// Prefer the file name the server supplies via Content-Disposition
    /// (`attachment; filename=...`). When the server sends none, the name
    /// from the destination path or URL is used.
    pub fn use_server_file_name(mut self, use_server: bool) -> Self {
        self.task.set_use_server_file_name(use_server);
        self
    }

    /// Register a resolver for servers that report the file length in a
    /// non-standard header, or not at all. Must be a named type; see
    /// [`FileLenResolver`].
    pub fn file_len_resolver<R>(mut self, resolver: R) -> Result<Self, BuildError>
    where
        R: FileLenResolver + 'static,
    {
        self.task.set_file_len_resolver(resolver)?;
        Ok(self)
    }

    /// Plain-HTTP options (headers, parameters, method, redirects). The
    /// view writes into this builder's task; nothing is cloned or branched.
    pub fn http_options(&mut self) -> HttpOptions<'_> {
        HttpOptions::new(&mut self.task)
    }

    /// Segmented-streaming options (variant selection, part handling). The
    /// view writes into this builder's task; the protocol chosen at
    /// construction is not changed by using it.
    pub fn stream_options(&mut self) -> StreamOptions<'_> {
        StreamOptions::new(&mut self.task)
    }

    /// The task as configured so far.
    pub fn task(&self) -> &DownloadTask {
        &self.task
    }

    /// Finalize: hand the task over for submission to the engine. Consumes
    /// the builder, so no further configuration is possible.
    pub fn finish(self) -> DownloadTask {
        self.task
    }
}
