//! Error type for task assembly.

use thiserror::Error;

use crate::options::OptionKey;

/// Raised synchronously by the configuring call that received bad input.
/// These are caller mistakes; nothing here is retried or swallowed, and no
/// validation is deferred to submission time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required string argument was empty or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The destination must name a file, not a directory. Checked lexically;
    /// the filesystem is never touched at configuration time.
    #[error("invalid file path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// A write to the option store did not match the key's declared kind.
    #[error("option {key:?} takes a {expected} value, got {got}")]
    TypeMismatch {
        key: OptionKey,
        expected: &'static str,
        got: &'static str,
    },

    /// The callback is a closure. Closures capture their environment, and a
    /// stored task can outlive the scope that configured it; callbacks must
    /// be implemented on a named type.
    #[error("unsafe callback type `{0}`: implement the trait on a named type instead of a closure")]
    UnsafeAdapter(&'static str),
}
