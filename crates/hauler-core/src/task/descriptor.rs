//! The per-task record: protocol, locator, destination, and options.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::options::{OptionKey, OptionValue, TaskOptions};
use crate::task::adapter::{self, FileLenResolver};
use crate::task::BuildError;

/// Transfer protocol of a task. Fixed at creation; obtaining a capability
/// delegate later never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP(S) download of a single resource.
    Http,
    /// Segmented stream described by an HLS manifest.
    Hls,
}

/// Declarative record of one download task.
///
/// Mutable only through [`TaskBuilder`](crate::task::TaskBuilder) and the
/// capability delegates while the task is being configured; finalization
/// moves it out of the builder, after which this crate never touches it
/// again.
pub struct DownloadTask {
    protocol: Protocol,
    url: String,
    dest_path: Option<String>,
    force_overwrite: bool,
    use_server_file_name: bool,
    file_len_resolver: Option<Arc<dyn FileLenResolver>>,
    resolver_type: Option<&'static str>,
    options: TaskOptions,
}

impl DownloadTask {
    /// Both arguments are required and immutable afterwards. The locator
    /// must be a non-empty, parseable absolute URL.
    pub(crate) fn new(protocol: Protocol, url: String) -> Result<Self, BuildError> {
        if url.trim().is_empty() {
            return Err(BuildError::InvalidArgument(
                "task URL must not be empty".to_string(),
            ));
        }
        if let Err(e) = url::Url::parse(&url) {
            return Err(BuildError::InvalidArgument(format!(
                "task URL {url:?} is not a valid URL: {e}"
            )));
        }
        Ok(Self {
            protocol,
            url,
            dest_path: None,
            force_overwrite: false,
            use_server_file_name: false,
            file_len_resolver: None,
            resolver_type: None,
            options: TaskOptions::new(),
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dest_path(&self) -> Option<&str> {
        self.dest_path.as_deref()
    }

    pub fn force_overwrite(&self) -> bool {
        self.force_overwrite
    }

    pub fn use_server_file_name(&self) -> bool {
        self.use_server_file_name
    }

    pub fn file_len_resolver(&self) -> Option<Arc<dyn FileLenResolver>> {
        self.file_len_resolver.as_ref().map(Arc::clone)
    }

    /// Concrete type name of the registered resolver, if any.
    pub fn file_len_resolver_type(&self) -> Option<&'static str> {
        self.resolver_type
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TaskOptions {
        &mut self.options
    }

    /// Record where the finished file should land. The path must name a
    /// file: empty paths and paths that lexically denote a directory are
    /// refused. Only the intended location is recorded; nothing is checked
    /// against the filesystem and no download starts here.
    pub fn set_dest_path(&mut self, path: &str) -> Result<(), BuildError> {
        if path.is_empty() {
            return Err(BuildError::InvalidPath {
                path: path.to_string(),
                reason: "path is empty",
            });
        }
        if path.ends_with('/') || path.ends_with('\\') {
            return Err(BuildError::InvalidPath {
                path: path.to_string(),
                reason: "path denotes a directory",
            });
        }
        let last = path.rsplit(['/', '\\']).next().unwrap_or("");
        if last.is_empty() || last == "." || last == ".." {
            return Err(BuildError::InvalidPath {
                path: path.to_string(),
                reason: "path denotes a directory",
            });
        }
        self.dest_path = Some(path.to_string());
        Ok(())
    }

    /// When set, the engine skips its destination-collision checks.
    /// Independent of `set_dest_path`; each field is last-write-wins.
    pub fn set_force_overwrite(&mut self, force: bool) {
        self.force_overwrite = force;
    }

    pub fn set_use_server_file_name(&mut self, use_server: bool) {
        self.use_server_file_name = use_server;
    }

    /// Register the file-length resolver. The resolver's concrete type is
    /// validated once, here; see [`FileLenResolver`] for the named-type
    /// requirement. On failure the task is left untouched.
    pub fn set_file_len_resolver<R>(&mut self, resolver: R) -> Result<(), BuildError>
    where
        R: FileLenResolver + 'static,
    {
        let type_name = adapter::ensure_named_type::<R>()?;
        self.file_len_resolver = Some(Arc::new(resolver));
        self.resolver_type = Some(type_name);
        tracing::debug!(resolver = type_name, "registered file length resolver");
        Ok(())
    }

    /// Serializable view of the task for display and handoff logs. Callback
    /// objects are represented by their type names only.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            protocol: self.protocol,
            url: self.url.clone(),
            dest_path: self.dest_path.clone(),
            force_overwrite: self.force_overwrite,
            use_server_file_name: self.use_server_file_name,
            file_len_resolver: self.resolver_type,
            options: self.options.values().clone(),
            request_headers: self
                .options
                .string_map(OptionKey::RequestHeaders)
                .cloned()
                .unwrap_or_default(),
            request_params: self
                .options
                .string_map(OptionKey::RequestParams)
                .cloned()
                .unwrap_or_default(),
            part_url_converter: self.options.part_url_converter_type(),
        }
    }
}

impl std::fmt::Debug for DownloadTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadTask")
            .field("protocol", &self.protocol)
            .field("url", &self.url)
            .field("dest_path", &self.dest_path)
            .field("force_overwrite", &self.force_overwrite)
            .field("use_server_file_name", &self.use_server_file_name)
            .field("file_len_resolver", &self.resolver_type)
            .field("options", &self.options)
            .finish()
    }
}

/// Engine-independent, serializable view of a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub protocol: Protocol,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_path: Option<String>,
    pub force_overwrite: bool,
    pub use_server_file_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_len_resolver: Option<&'static str>,
    pub options: BTreeMap<OptionKey, OptionValue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub request_headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub request_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_url_converter: Option<&'static str>,
}
