//! Caller-supplied callback seams and their registration-time validation.
//!
//! Callbacks are stored inside a task that can outlive the scope which
//! configured it, so implementations must not borrow that scope. `'static`
//! bounds already rule out borrowing closures at compile time; the
//! remaining hole is a closure that owns (or `Arc`s) pieces of its
//! environment and silently extends their lifetime. Those are rejected
//! structurally, once, when the callback is registered.

use crate::metadata::ResponseMetadata;
use crate::task::BuildError;

/// Resolves the total byte length of a download when the server-reported
/// length is absent or ambiguous. Invoked by the transfer engine, not by
/// the assembly layer.
///
/// Implement on a named type; closures are rejected at registration.
pub trait FileLenResolver: Send + Sync {
    /// Byte length derived from the response, or `None` when the metadata
    /// does not carry one and the engine should fall back to probing.
    fn file_len(&self, meta: &ResponseMetadata) -> Option<u64>;
}

impl<F> FileLenResolver for F
where
    F: Fn(&ResponseMetadata) -> Option<u64> + Send + Sync,
{
    fn file_len(&self, meta: &ResponseMetadata) -> Option<u64> {
        self(meta)
    }
}

/// Rewrites per-part URLs of a segmented stream relative to its manifest
/// URL. Invoked by the transfer engine once per part.
///
/// Implement on a named type; closures are rejected at registration.
pub trait PartUrlConverter: Send + Sync {
    fn convert(&self, manifest_url: &str, part_path: &str) -> String;
}

impl<F> PartUrlConverter for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn convert(&self, manifest_url: &str, part_path: &str) -> String {
        self(manifest_url, part_path)
    }
}

/// Structural check on a callback's concrete type: closures are refused,
/// named implementations pass. Returns the type name for diagnostics.
///
/// The closure marker in `type_name` output is not a stability guarantee,
/// but the failure mode is permissive: a missed closure is accepted, a
/// named type is never rejected.
pub(crate) fn ensure_named_type<T>() -> Result<&'static str, BuildError> {
    let name = std::any::type_name::<T>();
    if name.contains("{{closure}}") {
        return Err(BuildError::UnsafeAdapter(name));
    }
    Ok(name)
}
