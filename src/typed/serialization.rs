//! Serialization implementations for typed objects
//!
//! Deserialization always produces the unstructured variant: the document
//! decoder never applies registered decoders on its own, so callers can do a
//! two-phase decode (generic structure first, structured fields on demand).
//! Serialization re-emits the retained field mapping; structured objects are
//! encoded through a registry by the codec, not through serde.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{TypedObject, UnstructuredObject};

impl Serialize for UnstructuredObject {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnstructuredObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        UnstructuredObject::from_fields(fields).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TypedObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TypedObject::Unstructured(UnstructuredObject::deserialize(
            deserializer,
        )?))
    }
}
