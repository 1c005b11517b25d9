//! Built-in structured access types
//!
//! These are the well-known access schemas pre-registered in the default
//! registry: OCI registry references, GitHub commits, plain HTTP URLs and
//! local filesystem blobs. Any external module can supply further types by
//! registering a decoder/encoder pair for a new discriminant.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{TypedObjectCodec, TypedObjectRegistry};
use crate::typed::TypedObjectAccessor;

/// The embedded `type` discriminant tag shared by all access types
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(rename = "type")]
    pub name: String,
}

impl ObjectType {
    /// Create a tag for the given discriminant
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

macro_rules! impl_typed_object_accessor {
    ($ty:ty) => {
        impl TypedObjectAccessor for $ty {
            fn type_name(&self) -> &str {
                &self.object_type.name
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
    };
}

/// Access to an image or artifact in an OCI registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OciRegistryAccess {
    #[serde(flatten)]
    pub object_type: ObjectType,

    /// Fully qualified image reference, e.g. `registry.example.com/app:v1`
    #[serde(rename = "imageReference")]
    pub image_reference: String,
}

impl OciRegistryAccess {
    pub const TYPE: &'static str = "ociRegistry";

    pub fn new(image_reference: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::new(Self::TYPE),
            image_reference: image_reference.into(),
        }
    }
}

impl_typed_object_accessor!(OciRegistryAccess);

/// Access to a commit in a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubAccess {
    #[serde(flatten)]
    pub object_type: ObjectType,

    #[serde(rename = "repoUrl")]
    pub repo_url: String,

    #[serde(rename = "ref")]
    pub git_ref: String,

    pub commit: String,
}

impl GitHubAccess {
    pub const TYPE: &'static str = "github";

    pub fn new(
        repo_url: impl Into<String>,
        git_ref: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            object_type: ObjectType::new(Self::TYPE),
            repo_url: repo_url.into(),
            git_ref: git_ref.into(),
            commit: commit.into(),
        }
    }
}

impl_typed_object_accessor!(GitHubAccess);

/// Access to a resource served over plain HTTP(S)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAccess {
    #[serde(flatten)]
    pub object_type: ObjectType,

    pub url: String,
}

impl HttpAccess {
    pub const TYPE: &'static str = "web";

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::new(Self::TYPE),
            url: url.into(),
        }
    }
}

impl_typed_object_accessor!(HttpAccess);

/// Access to a blob stored on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFilesystemBlobAccess {
    #[serde(flatten)]
    pub object_type: ObjectType,

    pub filename: String,

    #[serde(rename = "mediaType", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl LocalFilesystemBlobAccess {
    pub const TYPE: &'static str = "localFilesystemBlob";

    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::new(Self::TYPE),
            filename: filename.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

impl_typed_object_accessor!(LocalFilesystemBlobAccess);

/// Register all built-in access types into the given registry
pub fn register_builtin(registry: &mut TypedObjectRegistry) {
    registry.register(
        OciRegistryAccess::TYPE,
        TypedObjectCodec::for_serde::<OciRegistryAccess>(),
    );
    registry.register(
        GitHubAccess::TYPE,
        TypedObjectCodec::for_serde::<GitHubAccess>(),
    );
    registry.register(HttpAccess::TYPE, TypedObjectCodec::for_serde::<HttpAccess>());
    registry.register(
        LocalFilesystemBlobAccess::TYPE,
        TypedObjectCodec::for_serde::<LocalFilesystemBlobAccess>(),
    );
}
