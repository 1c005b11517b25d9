//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::any::Any;

use serde::{Deserialize, Serialize};

use compdesc::{Result, TypedObjectAccessor, TypedObjectCodec};

/// Component descriptor with one local and one external resource, both
/// carrying access types no built-in decoder knows about.
pub const COMPONENT_YAML: &str = "
meta:
  schemaVersion: 'v2'

component:
  name: 'github.com/example/app'
  version: 'v1.7.2'
  provider: internal
  repositoryContexts: []
  sources: []
  componentReferences: []

  resources:
  - name: 'ftpRes'
    version: 'v1.7.2'
    type: 'custom1'
    relation: local
    access:
      type: 'x-ftp'
      url: ftp://example.com/my-resource

  - name: 'nodeMod'
    version: '0.0.1'
    type: 'nodeModule'
    relation: external
    access:
      type: 'npm'
      nodeModule: my-module
      version: 0.0.1
";

pub const NPM_TYPE: &str = "npm";

/// A custom access type the way an external plugin module would define one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmAccess {
    #[serde(rename = "type")]
    pub access_type: String,

    #[serde(rename = "nodeModule")]
    pub node_module: String,

    pub version: String,
}

impl TypedObjectAccessor for NpmAccess {
    fn type_name(&self) -> &str {
        &self.access_type
    }

    fn data(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn set_data(&mut self, data: &[u8]) -> Result<()> {
        *self = serde_yaml::from_slice(data)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// The decoder/encoder pair a plugin would register for `npm`
pub fn npm_codec() -> TypedObjectCodec {
    TypedObjectCodec::for_serde::<NpmAccess>()
}
