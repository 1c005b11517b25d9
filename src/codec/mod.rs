//! Typed-object codec: decode and encode access objects against a registry
//!
//! Decoding parses far enough to read the `type` discriminant, then either
//! applies the registered decoder or falls back to the unstructured
//! representation. Unknown discriminants are first class, never an error;
//! only a missing or empty discriminant fails. Encoding is the inverse:
//! structured objects require a registered encoder, unstructured objects
//! re-emit their retained field mapping.

use serde::de::DeserializeOwned;

use crate::error::{CompdescError, Result};
use crate::registry::{TypedObjectRegistry, default_registry};
use crate::typed::{TypedObject, TypedObjectAccessor, UnstructuredObject};

/// A typed-object codec bound to one registry instance
#[derive(Debug, Clone)]
pub struct Codec {
    registry: TypedObjectRegistry,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(default_registry().clone())
    }
}

impl Codec {
    /// Create a codec over the given known-type set
    pub fn new(registry: TypedObjectRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing this codec
    pub fn registry(&self) -> &TypedObjectRegistry {
        &self.registry
    }

    /// Mutable access for registering custom types on this codec only
    pub fn registry_mut(&mut self) -> &mut TypedObjectRegistry {
        &mut self.registry
    }

    /// Decode raw YAML or JSON bytes into a typed object
    ///
    /// A registered decoder failure surfaces as `DecodeFailed` identifying the
    /// type; it never silently falls back to the unstructured form.
    pub fn decode(&self, raw: &[u8]) -> Result<TypedObject> {
        let unstructured = UnstructuredObject::from_raw(raw)?;
        let Some(codec) = self.registry.get(unstructured.type_name()) else {
            return Ok(TypedObject::Unstructured(unstructured));
        };

        let type_name = unstructured.type_name().to_string();
        codec
            .decode(raw)
            .map(TypedObject::Structured)
            .map_err(|err| match err {
                CompdescError::ParseFailed { reason } => CompdescError::DecodeFailed {
                    type_name: type_name.clone(),
                    reason,
                },
                other => other,
            })
    }

    /// Decode raw bytes into a concrete access type
    ///
    /// With a registered decoder the produced accessor is downcast to `T`
    /// (`IncompatibleAccessor` when the decoder yields something else). For
    /// unregistered discriminants the bytes are decoded directly into `T`
    /// as a generic serde fallback.
    pub fn decode_as<T>(&self, raw: &[u8]) -> Result<T>
    where
        T: TypedObjectAccessor + DeserializeOwned + 'static,
    {
        match self.decode(raw)? {
            TypedObject::Structured(accessor) => {
                let type_name = accessor.type_name().to_string();
                accessor
                    .into_any()
                    .downcast::<T>()
                    .map(|boxed| *boxed)
                    .map_err(|_| CompdescError::IncompatibleAccessor { type_name })
            }
            TypedObject::Unstructured(obj) => {
                serde_yaml::from_slice(raw).map_err(|err| CompdescError::DecodeFailed {
                    type_name: obj.type_name().to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Encode a typed object to serialized bytes
    ///
    /// Structured objects whose discriminant is not registered fail with
    /// `EncodeUnregistered`: a concrete type without an encoding rule is an
    /// inconsistency the caller must resolve by registering matching pairs.
    pub fn encode(&self, obj: &TypedObject) -> Result<Vec<u8>> {
        match obj {
            TypedObject::Unstructured(unstructured) => unstructured.data(),
            TypedObject::Structured(accessor) => {
                let codec = self.registry.get(accessor.type_name()).ok_or_else(|| {
                    CompdescError::EncodeUnregistered {
                        type_name: accessor.type_name().to_string(),
                    }
                })?;
                codec.encode(accessor.as_ref())
            }
        }
    }
}
