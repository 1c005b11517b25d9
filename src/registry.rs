//! Typed-object registry: discriminant string → decoder/encoder pair
//!
//! This module provides:
//! - [`TypedObjectCodec`]: a registered decode/encode function pair
//! - [`TypedObjectRegistry`]: the lookup table, cloneable for isolated type sets
//! - [`default_registry`]: the process-wide base registry with built-in access types
//!
//! The default registry is immutable. Callers wanting a custom known-type set
//! clone it and register into the clone, so one call path's registrations never
//! leak into unrelated decode operations.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CompdescError, Result};
use crate::typed::TypedObjectAccessor;

/// Decoder: serialized bytes → concrete accessor
pub type DecodeFn = Arc<dyn Fn(&[u8]) -> Result<Box<dyn TypedObjectAccessor>> + Send + Sync>;

/// Encoder: concrete accessor → serialized bytes
pub type EncodeFn = Arc<dyn Fn(&dyn TypedObjectAccessor) -> Result<Vec<u8>> + Send + Sync>;

/// A decoder/encoder pair registered for one discriminant
#[derive(Clone)]
pub struct TypedObjectCodec {
    decoder: DecodeFn,
    encoder: EncodeFn,
}

impl TypedObjectCodec {
    /// Create a codec from explicit decode/encode functions
    pub fn new(decoder: DecodeFn, encoder: EncodeFn) -> Self {
        Self { decoder, encoder }
    }

    /// Build the decode/encode pair for a serde access type
    ///
    /// Decoding accepts YAML or JSON bytes; encoding emits canonical JSON and
    /// fails with `IncompatibleAccessor` when handed an accessor of a different
    /// concrete type.
    pub fn for_serde<T>() -> Self
    where
        T: TypedObjectAccessor + Serialize + DeserializeOwned + 'static,
    {
        let decoder: DecodeFn = Arc::new(|raw: &[u8]| {
            let obj: T = serde_yaml::from_slice(raw)?;
            Ok(Box::new(obj) as Box<dyn TypedObjectAccessor>)
        });
        let encoder: EncodeFn = Arc::new(|accessor: &dyn TypedObjectAccessor| {
            let obj = accessor.as_any().downcast_ref::<T>().ok_or_else(|| {
                CompdescError::IncompatibleAccessor {
                    type_name: accessor.type_name().to_string(),
                }
            })?;
            serde_json::to_vec(obj).map_err(|err| CompdescError::EncodeFailed {
                type_name: accessor.type_name().to_string(),
                reason: err.to_string(),
            })
        });
        Self { decoder, encoder }
    }

    /// Build a decode-only pair for a serde access type
    ///
    /// Decoding yields the structured type; encoding fails with
    /// `EncodeUnregistered`. Registering decode/encode rules separately leaves
    /// the round-trip inconsistency for the caller to resolve, per policy.
    pub fn decoder_only<T>() -> Self
    where
        T: TypedObjectAccessor + DeserializeOwned + 'static,
    {
        let decoder: DecodeFn = Arc::new(|raw: &[u8]| {
            let obj: T = serde_yaml::from_slice(raw)?;
            Ok(Box::new(obj) as Box<dyn TypedObjectAccessor>)
        });
        let encoder: EncodeFn = Arc::new(|accessor: &dyn TypedObjectAccessor| {
            Err(CompdescError::EncodeUnregistered {
                type_name: accessor.type_name().to_string(),
            })
        });
        Self { decoder, encoder }
    }

    /// Invoke the registered decoder
    pub fn decode(&self, raw: &[u8]) -> Result<Box<dyn TypedObjectAccessor>> {
        (self.decoder)(raw)
    }

    /// Invoke the registered encoder
    pub fn encode(&self, accessor: &dyn TypedObjectAccessor) -> Result<Vec<u8>> {
        (self.encoder)(accessor)
    }
}

impl fmt::Debug for TypedObjectCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedObjectCodec").finish_non_exhaustive()
    }
}

/// Registry of known typed-object discriminants
#[derive(Debug, Clone, Default)]
pub struct TypedObjectRegistry {
    entries: HashMap<String, TypedObjectCodec>,
}

impl TypedObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the codec for a discriminant (last write wins)
    pub fn register(&mut self, type_name: impl Into<String>, codec: TypedObjectCodec) {
        self.entries.insert(type_name.into(), codec);
    }

    /// Look up the codec for a discriminant
    ///
    /// `None` signals "use unstructured fallback handling", not an error.
    pub fn get(&self, type_name: &str) -> Option<&TypedObjectCodec> {
        self.entries.get(type_name)
    }

    /// Whether a discriminant has a registered codec
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// All registered discriminants
    pub fn types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

/// The process-wide base registry, pre-populated with the built-in access types
///
/// Immutable by construction. Clone it to register custom types.
pub fn default_registry() -> &'static TypedObjectRegistry {
    static DEFAULT: OnceLock<TypedObjectRegistry> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        let mut registry = TypedObjectRegistry::new();
        crate::access::register_builtin(&mut registry);
        registry
    })
}
