//! Typed per-task option store.
//!
//! Extensible configuration travels with a task as a closed set of keys,
//! each bound to a fixed value kind. Primitive values and callback objects
//! live in separate maps so the engine can snapshot the former without
//! touching the latter.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::task::{BuildError, PartUrlConverter};

/// Identifier for a per-task option.
///
/// The set is closed and shared with the transfer engine: adding an option
/// means adding a variant here plus its [`ValueKind`] in [`OptionKey::kind`].
/// Free-form string keys are deliberately not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKey {
    /// HTTP request method; defaults to `GET`.
    RequestMethod,
    /// Whether the engine follows redirects; defaults to true.
    FollowRedirects,
    /// Request headers, name to value.
    RequestHeaders,
    /// Request parameters, name to value.
    RequestParams,
    /// Preferred stream variant bandwidth in bits per second; 0 means the
    /// engine takes the first variant the manifest offers.
    StreamBandwidth,
    /// Skip stream parts that keep failing instead of failing the task.
    IgnoreFailedParts,
    /// Caller-supplied converter for per-part URLs.
    PartUrlConverter,
}

/// Value kind a key accepts. Checked on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Text,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Text => "text",
            ValueKind::Object => "object",
        }
    }
}

impl OptionKey {
    /// Declared value kind for this key.
    pub fn kind(self) -> ValueKind {
        match self {
            OptionKey::RequestMethod => ValueKind::Text,
            OptionKey::FollowRedirects => ValueKind::Bool,
            OptionKey::StreamBandwidth => ValueKind::Int,
            OptionKey::IgnoreFailedParts => ValueKind::Bool,
            OptionKey::RequestHeaders | OptionKey::RequestParams | OptionKey::PartUrlConverter => {
                ValueKind::Object
            }
        }
    }
}

/// Primitive option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(u64),
    Text(String),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Bool(_) => ValueKind::Bool,
            OptionValue::Int(_) => ValueKind::Int,
            OptionValue::Text(_) => ValueKind::Text,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<u64> for OptionValue {
    fn from(v: u64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

/// Object option value. Object-kind keys additionally declare which variant
/// they accept, so a converter cannot land under a header key.
#[derive(Clone)]
pub enum ObjectValue {
    /// String-keyed, string-valued map (headers, parameters).
    StringMap(BTreeMap<String, String>),
    /// Per-part URL converter with its concrete type name for diagnostics.
    PartConverter {
        converter: Arc<dyn PartUrlConverter>,
        type_name: &'static str,
    },
}

impl std::fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectValue::StringMap(map) => f.debug_tuple("StringMap").field(map).finish(),
            ObjectValue::PartConverter { type_name, .. } => {
                f.debug_tuple("PartConverter").field(type_name).finish()
            }
        }
    }
}

impl ObjectValue {
    fn shape(&self) -> &'static str {
        match self {
            ObjectValue::StringMap(_) => "string map",
            ObjectValue::PartConverter { .. } => "part-url converter",
        }
    }
}

/// Per-task option registry: one map of primitive values, one of objects.
/// A key lives in at most one of the two, decided by its declared kind.
/// Writes overwrite silently; reads of unset keys yield documented defaults.
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    values: BTreeMap<OptionKey, OptionValue>,
    objects: BTreeMap<OptionKey, ObjectValue>,
}

impl TaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a primitive value. Fails with `TypeMismatch` if the value's
    /// kind differs from the key's declared kind (object-kind keys never
    /// accept primitives). Leaves the registry untouched on failure.
    pub fn set_value(
        &mut self,
        key: OptionKey,
        value: impl Into<OptionValue>,
    ) -> Result<(), BuildError> {
        let value = value.into();
        if key.kind() != value.kind() {
            return Err(BuildError::TypeMismatch {
                key,
                expected: key.kind().name(),
                got: value.kind().name(),
            });
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Store an object value. Fails with `TypeMismatch` if the key is not
    /// object-kind or the object variant does not match the key's shape.
    pub fn set_object(&mut self, key: OptionKey, obj: ObjectValue) -> Result<(), BuildError> {
        if key.kind() != ValueKind::Object {
            return Err(BuildError::TypeMismatch {
                key,
                expected: key.kind().name(),
                got: ValueKind::Object.name(),
            });
        }
        let shape_ok = matches!(
            (key, &obj),
            (OptionKey::RequestHeaders, ObjectValue::StringMap(_))
                | (OptionKey::RequestParams, ObjectValue::StringMap(_))
                | (OptionKey::PartUrlConverter, ObjectValue::PartConverter { .. })
        );
        if !shape_ok {
            return Err(BuildError::TypeMismatch {
                key,
                expected: match key {
                    OptionKey::PartUrlConverter => "part-url converter",
                    _ => "string map",
                },
                got: obj.shape(),
            });
        }
        self.objects.insert(key, obj);
        Ok(())
    }

    /// Boolean value of `key`, or its default when unset.
    /// Defaults: `FollowRedirects` true, everything else false.
    pub fn bool_opt(&self, key: OptionKey) -> bool {
        match self.values.get(&key) {
            Some(OptionValue::Bool(v)) => *v,
            _ => matches!(key, OptionKey::FollowRedirects),
        }
    }

    /// Integer value of `key`, or 0 when unset.
    pub fn int_opt(&self, key: OptionKey) -> u64 {
        match self.values.get(&key) {
            Some(OptionValue::Int(v)) => *v,
            _ => 0,
        }
    }

    /// Text value of `key`, or its default when unset.
    /// Defaults: `RequestMethod` `"GET"`, everything else empty.
    pub fn text_opt(&self, key: OptionKey) -> String {
        match self.values.get(&key) {
            Some(OptionValue::Text(v)) => v.clone(),
            _ => match key {
                OptionKey::RequestMethod => "GET".to_string(),
                _ => String::new(),
            },
        }
    }

    /// String map stored under `key`, if any.
    pub fn string_map(&self, key: OptionKey) -> Option<&BTreeMap<String, String>> {
        match self.objects.get(&key) {
            Some(ObjectValue::StringMap(map)) => Some(map),
            _ => None,
        }
    }

    /// Stored part-URL converter, if any.
    pub fn part_url_converter(&self) -> Option<Arc<dyn PartUrlConverter>> {
        match self.objects.get(&OptionKey::PartUrlConverter) {
            Some(ObjectValue::PartConverter { converter, .. }) => Some(Arc::clone(converter)),
            _ => None,
        }
    }

    /// Concrete type name of the stored part-URL converter, if any.
    pub fn part_url_converter_type(&self) -> Option<&'static str> {
        match self.objects.get(&OptionKey::PartUrlConverter) {
            Some(ObjectValue::PartConverter { type_name, .. }) => Some(type_name),
            _ => None,
        }
    }

    /// Primitive entries, for snapshotting only.
    pub fn values(&self) -> &BTreeMap<OptionKey, OptionValue> {
        &self.values
    }

    /// Mutable access to the string map under `key`, creating it empty on
    /// first use. Reserved for the capability delegates, which own these
    /// keys; per-name last write wins.
    pub(crate) fn string_map_mut(&mut self, key: OptionKey) -> &mut BTreeMap<String, String> {
        let slot = self
            .objects
            .entry(key)
            .or_insert_with(|| ObjectValue::StringMap(BTreeMap::new()));
        if !matches!(slot, ObjectValue::StringMap(_)) {
            *slot = ObjectValue::StringMap(BTreeMap::new());
        }
        match slot {
            ObjectValue::StringMap(map) => map,
            _ => unreachable!("slot normalized to a string map above"),
        }
    }
}
