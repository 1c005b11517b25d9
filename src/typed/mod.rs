//! Polymorphic typed objects
//!
//! This module provides:
//! - [`TypedObjectAccessor`]: the capability set every structured access type implements
//! - [`UnstructuredObject`]: the generic fallback representation for unknown discriminants
//! - [`TypedObject`]: the tagged container holding either variant
//!
//! Every typed object, structured or not, can report its `type` discriminant and
//! produce bytes equivalent to its original serialized form (modulo key ordering).

pub mod serialization;

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{CompdescError, Result};

/// Name of the discriminant field carried by every typed object
pub const DISCRIMINANT_FIELD: &str = "type";

/// Capability set for concrete (structured) access types
///
/// Implementors are plain serde structs; `data` returns the canonical JSON
/// serialization and `set_data` replaces the contents from serialized bytes.
pub trait TypedObjectAccessor: Any + fmt::Debug + Send + Sync {
    /// The `type` discriminant of this object
    fn type_name(&self) -> &str;

    /// Serialize this object to canonical JSON bytes
    fn data(&self) -> Result<Vec<u8>>;

    /// Replace this object's contents from serialized bytes
    fn set_data(&mut self, data: &[u8]) -> Result<()>;

    /// Upcast for runtime type inspection
    fn as_any(&self) -> &dyn Any;

    /// Upcast an owned box for downcasting to the concrete type
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Generic representation of a typed object with no registered decoder
///
/// Retains the full parsed field mapping (in original key order) plus the
/// canonical raw bytes, so unknown types re-encode without data loss.
#[derive(Debug, Clone, PartialEq)]
pub struct UnstructuredObject {
    type_name: String,
    fields: Map<String, Value>,
    raw: Vec<u8>,
}

impl UnstructuredObject {
    /// Build from an already-parsed field mapping
    ///
    /// Fails with `MissingDiscriminant` when the `type` field is absent, empty
    /// or not a string.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        let type_name = match fields.get(DISCRIMINANT_FIELD).and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(CompdescError::MissingDiscriminant),
        };
        let raw = serde_json::to_vec(&fields)?;
        Ok(Self {
            type_name,
            fields,
            raw,
        })
    }

    /// Parse raw YAML or JSON bytes into an unstructured object
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(CompdescError::ParseFailed {
                reason: "empty input".to_string(),
            });
        }
        let fields: Map<String, Value> = serde_yaml::from_slice(raw)?;
        Self::from_fields(fields)
    }

    /// The `type` discriminant
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a field by key in the generic view
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All retained fields, in original key order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Canonical raw bytes of the originally parsed form
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

impl TypedObjectAccessor for UnstructuredObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn data(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.fields)?)
    }

    fn set_data(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_raw(data)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A polymorphic typed object: either a decoded concrete type or the generic fallback
#[derive(Debug)]
pub enum TypedObject {
    /// Generic key/value view plus raw bytes (no decoder registered)
    Unstructured(UnstructuredObject),
    /// A concrete decoded access type
    Structured(Box<dyn TypedObjectAccessor>),
}

impl TypedObject {
    /// Wrap a concrete accessor as a structured typed object
    pub fn from_accessor(accessor: impl TypedObjectAccessor) -> Self {
        TypedObject::Structured(Box::new(accessor))
    }

    /// The `type` discriminant, regardless of variant
    pub fn type_name(&self) -> &str {
        match self {
            TypedObject::Unstructured(obj) => obj.type_name(),
            TypedObject::Structured(obj) => obj.type_name(),
        }
    }

    /// The unstructured view, when no decoder was applied
    pub fn as_unstructured(&self) -> Option<&UnstructuredObject> {
        match self {
            TypedObject::Unstructured(obj) => Some(obj),
            TypedObject::Structured(_) => None,
        }
    }

    /// The structured accessor, when a decoder was applied
    pub fn as_accessor(&self) -> Option<&dyn TypedObjectAccessor> {
        match self {
            TypedObject::Unstructured(_) => None,
            TypedObject::Structured(obj) => Some(obj.as_ref()),
        }
    }

    /// Downcast the structured variant to a concrete access type
    pub fn downcast_ref<T: TypedObjectAccessor>(&self) -> Option<&T> {
        self.as_accessor()?.as_any().downcast_ref::<T>()
    }

    /// Convenience field lookup on the unstructured view
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_unstructured()?.get(key)
    }

    /// Serialized bytes equivalent to the original form
    ///
    /// Unstructured objects return their retained raw bytes; structured objects
    /// serialize through their accessor.
    pub fn data(&self) -> Result<Vec<u8>> {
        match self {
            TypedObject::Unstructured(obj) => Ok(obj.raw().to_vec()),
            TypedObject::Structured(obj) => obj.data(),
        }
    }
}

impl From<UnstructuredObject> for TypedObject {
    fn from(obj: UnstructuredObject) -> Self {
        TypedObject::Unstructured(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftp_raw() -> &'static [u8] {
        b"{\"type\": \"x-ftp\", \"url\": \"ftp://example.com/my-resource\"}"
    }

    #[test]
    fn test_unstructured_from_raw() {
        let obj = UnstructuredObject::from_raw(ftp_raw()).unwrap();
        assert_eq!(obj.type_name(), "x-ftp");
        assert_eq!(
            obj.get("url").and_then(Value::as_str),
            Some("ftp://example.com/my-resource")
        );
    }

    #[test]
    fn test_unstructured_from_yaml_raw() {
        let obj = UnstructuredObject::from_raw(b"type: x-ftp\nurl: ftp://example.com/a\n").unwrap();
        assert_eq!(obj.type_name(), "x-ftp");
        assert_eq!(obj.get("url").and_then(Value::as_str), Some("ftp://example.com/a"));
    }

    #[test]
    fn test_unstructured_empty_raw_fails() {
        let err = UnstructuredObject::from_raw(b"").unwrap_err();
        assert!(matches!(err, CompdescError::ParseFailed { .. }));
    }

    #[test]
    fn test_unstructured_missing_discriminant_fails() {
        let err = UnstructuredObject::from_raw(b"{\"url\": \"ftp://x\"}").unwrap_err();
        assert!(matches!(err, CompdescError::MissingDiscriminant));
    }

    #[test]
    fn test_unstructured_empty_discriminant_fails() {
        let err = UnstructuredObject::from_raw(b"{\"type\": \"\", \"url\": \"ftp://x\"}").unwrap_err();
        assert!(matches!(err, CompdescError::MissingDiscriminant));
    }

    #[test]
    fn test_unstructured_preserves_key_order() {
        let obj = UnstructuredObject::from_raw(b"{\"type\": \"t\", \"b\": 1, \"a\": 2}").unwrap();
        let keys: Vec<_> = obj.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "b", "a"]);
    }

    #[test]
    fn test_unstructured_set_data_replaces_contents() {
        let mut obj = UnstructuredObject::from_raw(ftp_raw()).unwrap();
        obj.set_data(b"{\"type\": \"npm\", \"nodeModule\": \"my-module\"}")
            .unwrap();
        assert_eq!(obj.type_name(), "npm");
        assert_eq!(
            obj.get("nodeModule").and_then(Value::as_str),
            Some("my-module")
        );
    }

    #[test]
    fn test_typed_object_variant_accessors() {
        let obj: TypedObject = UnstructuredObject::from_raw(ftp_raw()).unwrap().into();
        assert_eq!(obj.type_name(), "x-ftp");
        assert!(obj.as_unstructured().is_some());
        assert!(obj.as_accessor().is_none());
        assert_eq!(
            obj.get("url").and_then(Value::as_str),
            Some("ftp://example.com/my-resource")
        );
    }

    #[test]
    fn test_typed_object_data_round_trips_fields() {
        let obj: TypedObject = UnstructuredObject::from_raw(ftp_raw()).unwrap().into();
        let bytes = obj.data().unwrap();
        let reparsed = UnstructuredObject::from_raw(&bytes).unwrap();
        assert_eq!(obj.as_unstructured().unwrap().fields(), reparsed.fields());
    }
}
