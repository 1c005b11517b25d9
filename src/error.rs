//! Error types and handling for compdesc
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The taxonomy separates the layers of the pipeline:
//! - Parse errors: malformed raw YAML/JSON syntax
//! - Schema errors: a well-formed document missing required top-level fields
//! - Decode/encode errors: typed-object codec failures against a registry
//! - Resolution errors: resource lookup by (type, name, version, relation)
//!
//! Unknown access-type discriminants are deliberately NOT an error anywhere:
//! they fall back to the unstructured representation. Only a missing or empty
//! discriminant fails.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for compdesc operations
#[derive(Error, Diagnostic, Debug)]
pub enum CompdescError {
    // Raw syntax errors
    #[error("Failed to parse document: {reason}")]
    #[diagnostic(code(compdesc::parse_failed))]
    ParseFailed { reason: String },

    // Top-level schema errors
    #[error("Invalid component descriptor: {message}")]
    #[diagnostic(
        code(compdesc::schema::invalid),
        help("A component descriptor requires a non-empty component name and version")
    )]
    SchemaInvalid { message: String },

    #[error("Unsupported schema version: '{version}'")]
    #[diagnostic(
        code(compdesc::schema::unsupported_version),
        help("Only schema version 'v2' is supported")
    )]
    UnsupportedSchemaVersion { version: String },

    // Typed-object codec errors
    #[error("Typed object has a missing or empty 'type' discriminant")]
    #[diagnostic(
        code(compdesc::codec::missing_discriminant),
        help("Every access object must carry a non-empty 'type' field")
    )]
    MissingDiscriminant,

    #[error("Failed to decode typed object of type '{type_name}': {reason}")]
    #[diagnostic(code(compdesc::codec::decode_failed))]
    DecodeFailed { type_name: String, reason: String },

    #[error("No encoder registered for type '{type_name}'")]
    #[diagnostic(
        code(compdesc::codec::encode_unregistered),
        help("Register matching decoder/encoder pairs together before encoding")
    )]
    EncodeUnregistered { type_name: String },

    #[error("Failed to encode typed object of type '{type_name}': {reason}")]
    #[diagnostic(code(compdesc::codec::encode_failed))]
    EncodeFailed { type_name: String, reason: String },

    #[error("Registered decoder for '{type_name}' produced an incompatible accessor")]
    #[diagnostic(
        code(compdesc::codec::incompatible_accessor),
        help("The decoder for this discriminant does not produce the requested type")
    )]
    IncompatibleAccessor { type_name: String },

    // Resolution errors
    #[error("Resource not found: {relation} {resource_type}/{name}@{version}")]
    #[diagnostic(code(compdesc::resolve::not_found))]
    ResourceNotFound {
        relation: String,
        resource_type: String,
        name: String,
        version: String,
    },

    #[error(
        "Ambiguous resource: {count} {relation} resources match {resource_type}/{name}@{version}"
    )]
    #[diagnostic(
        code(compdesc::resolve::ambiguous),
        help("A (type, name, version) tuple must identify at most one resource per relation")
    )]
    AmbiguousResource {
        relation: String,
        resource_type: String,
        name: String,
        version: String,
        count: usize,
    },
}

impl From<serde_yaml::Error> for CompdescError {
    fn from(err: serde_yaml::Error) -> Self {
        CompdescError::ParseFailed {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CompdescError {
    fn from(err: serde_json::Error) -> Self {
        CompdescError::ParseFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CompdescError>;
