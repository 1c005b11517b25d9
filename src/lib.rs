//! compdesc - component descriptor codec and resolution
//!
//! A polymorphic typed-object codec with a pluggable type registry, used to
//! decode and encode heterogeneous access objects embedded in component
//! descriptors, plus resource resolution by (type, name, version) and
//! relation.
//!
//! Access types form an open set: a registered decoder yields the concrete
//! type, an unregistered discriminant falls back to a generic representation
//! that retains the raw bytes and a key-ordered field view, so unknown types
//! round-trip without data loss.
//!
//! # Example
//!
//! ```
//! use compdesc::ComponentDescriptor;
//!
//! let data = "
//! meta:
//!   schemaVersion: 'v2'
//!
//! component:
//!   name: 'github.com/example/app'
//!   version: 'v1.7.2'
//!   provider: internal
//!   resources:
//!   - name: 'ftpRes'
//!     version: 'v1.7.2'
//!     type: 'custom1'
//!     relation: local
//!     access:
//!       type: 'x-ftp'
//!       url: ftp://example.com/my-resource
//! ";
//!
//! let descriptor = ComponentDescriptor::from_yaml(data)?;
//!
//! // Accesses decode as unstructured by default; unknown types keep their
//! // full field set available through the generic view.
//! let resource = descriptor.get_local_resource("custom1", "ftpRes", "v1.7.2")?;
//! assert_eq!(
//!     resource.access.get("url").and_then(|v| v.as_str()),
//!     Some("ftp://example.com/my-resource"),
//! );
//! # Ok::<(), compdesc::CompdescError>(())
//! ```

pub mod access;
pub mod codec;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod typed;

pub use codec::Codec;
pub use descriptor::{
    Component, ComponentDescriptor, Metadata, Resource, ResourceRelation, SCHEMA_VERSION_V2,
};
pub use error::{CompdescError, Result};
pub use registry::{TypedObjectCodec, TypedObjectRegistry, default_registry};
pub use typed::{TypedObject, TypedObjectAccessor, UnstructuredObject};
