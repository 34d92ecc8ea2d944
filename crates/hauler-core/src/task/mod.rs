//! Task assembly: descriptor, fluent builder, and capability views.
//!
//! A task is configured through [`TaskBuilder`] and the option views it
//! hands out, then moved out with [`TaskBuilder::finish`] and submitted to
//! the transfer engine. All validation happens at the configuring call;
//! submission never discovers a structurally bad task.

mod adapter;
mod builder;
mod descriptor;
mod error;
mod http;
mod stream;

pub use adapter::{FileLenResolver, PartUrlConverter};
pub use builder::TaskBuilder;
pub use descriptor::{DownloadTask, Protocol, TaskSnapshot};
pub use error::BuildError;
pub use http::HttpOptions;
pub use stream::StreamOptions;
