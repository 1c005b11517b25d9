//! Component descriptor data model
//!
//! This module handles the outer document schema: the meta/version envelope,
//! component identity, and the resource/source/reference sequences. Access
//! fields stay unstructured after document decode; structured decoding happens
//! on demand through [`crate::codec::Codec`].

pub mod resolve;

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{CompdescError, Result};
use crate::registry::{TypedObjectRegistry, default_registry};
use crate::typed::TypedObject;

/// The only supported descriptor schema version
pub const SCHEMA_VERSION_V2: &str = "v2";

/// Root metadata document describing a software component
#[derive(Debug, Deserialize)]
pub struct ComponentDescriptor {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub component: Component,
}

/// Schema-version envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: String,
}

/// Component identity plus its resource, source and reference sequences
///
/// Repository contexts, sources and component references round-trip as opaque
/// values; only resources are modeled in full.
#[derive(Debug, Default, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub provider: String,

    #[serde(rename = "repositoryContexts", default)]
    pub repository_contexts: Vec<Value>,

    #[serde(default)]
    pub sources: Vec<Value>,

    #[serde(rename = "componentReferences", default)]
    pub component_references: Vec<Value>,

    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// An artifact entry with a typed access method
#[derive(Debug, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(rename = "type", default)]
    pub resource_type: String,

    pub relation: ResourceRelation,

    pub access: TypedObject,
}

/// Whether a resource is built by this component or sourced from elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceRelation {
    Local,
    External,
}

impl ResourceRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceRelation::Local => "local",
            ResourceRelation::External => "external",
        }
    }
}

impl fmt::Display for ResourceRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ComponentDescriptor {
    /// Parse a component descriptor from YAML or JSON text
    pub fn from_yaml(raw: &str) -> Result<Self> {
        Self::from_slice(raw.as_bytes())
    }

    /// Parse a component descriptor from raw YAML or JSON bytes
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let descriptor: Self = serde_yaml::from_slice(raw)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Validate the top-level schema
    ///
    /// Checks the schema-version dispatch and the required identity fields.
    /// Access objects were already validated during deserialization (every one
    /// carries a non-empty discriminant).
    pub fn validate(&self) -> Result<()> {
        if self.meta.schema_version.is_empty() {
            return Err(CompdescError::SchemaInvalid {
                message: "missing meta.schemaVersion".to_string(),
            });
        }
        if self.meta.schema_version != SCHEMA_VERSION_V2 {
            return Err(CompdescError::UnsupportedSchemaVersion {
                version: self.meta.schema_version.clone(),
            });
        }
        if self.component.name.is_empty() {
            return Err(CompdescError::SchemaInvalid {
                message: "missing component.name".to_string(),
            });
        }
        if self.component.version.is_empty() {
            return Err(CompdescError::SchemaInvalid {
                message: "missing component.version".to_string(),
            });
        }
        for resource in &self.component.resources {
            if resource.name.is_empty() {
                return Err(CompdescError::SchemaInvalid {
                    message: "resource with empty name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Re-serialize to YAML using the default registry
    pub fn to_yaml(&self) -> Result<String> {
        self.to_yaml_with(default_registry())
    }

    /// Re-serialize to YAML
    ///
    /// Unstructured accesses re-emit their retained field mappings; structured
    /// accesses are serialized through the given registry and fail with
    /// `EncodeUnregistered` when their discriminant has no encoder.
    pub fn to_yaml_with(&self, registry: &TypedObjectRegistry) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_value(registry)?)?)
    }

    /// Re-serialize to JSON using the default registry
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with(default_registry())
    }

    /// Re-serialize to JSON
    pub fn to_json_with(&self, registry: &TypedObjectRegistry) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value(registry)?)?)
    }

    fn to_value(&self, registry: &TypedObjectRegistry) -> Result<Value> {
        let component = &self.component;
        let resources = component
            .resources
            .iter()
            .map(|resource| resource.to_value(registry))
            .collect::<Result<Vec<Value>>>()?;

        Ok(json!({
            "meta": { "schemaVersion": self.meta.schema_version },
            "component": {
                "name": component.name,
                "version": component.version,
                "provider": component.provider,
                "repositoryContexts": component.repository_contexts,
                "sources": component.sources,
                "componentReferences": component.component_references,
                "resources": resources,
            },
        }))
    }
}

impl Resource {
    fn to_value(&self, registry: &TypedObjectRegistry) -> Result<Value> {
        let access = match &self.access {
            TypedObject::Unstructured(obj) => Value::Object(obj.fields().clone()),
            TypedObject::Structured(accessor) => {
                let codec = registry.get(accessor.type_name()).ok_or_else(|| {
                    CompdescError::EncodeUnregistered {
                        type_name: accessor.type_name().to_string(),
                    }
                })?;
                let bytes = codec.encode(accessor.as_ref())?;
                serde_json::from_slice(&bytes)?
            }
        };

        Ok(json!({
            "name": self.name,
            "version": self.version,
            "type": self.resource_type,
            "relation": self.relation.as_str(),
            "access": access,
        }))
    }
}
