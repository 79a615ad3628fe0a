//! Error types for the binding engine.
//!
//! None of these reach callers of [`PropertyGrid`](crate::PropertyGrid)
//! operations: the grid logs them and hands them to the optional
//! diagnostics callback, then carries on. They exist so each failure path
//! can be exercised on its own.

use thiserror::Error;

/// Error reported by a user-supplied accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AccessError(pub String);

impl From<&str> for AccessError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for AccessError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Property discovery failed; the whole pass is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("surface of {type_name} unavailable: {message}")]
    Surface { type_name: String, message: String },
    #[error("bound object is already mutably borrowed")]
    ObjectBusy,
}

/// Reading a property value failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("property has no reader")]
    NoReader,
    #[error("reader returned no value")]
    Null,
    #[error("reader expected a {expected}")]
    TypeMismatch { expected: &'static str },
    #[error("value of type {0} cannot be displayed")]
    Unsupported(String),
    #[error("bound object is already mutably borrowed")]
    ObjectBusy,
    #[error("reader failed: {0}")]
    Failed(#[from] AccessError),
}

/// Writing a property value failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("property has no writer")]
    NoWriter,
    #[error("writer expected a {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("bound object is already borrowed")]
    ObjectBusy,
    #[error("writer failed: {0}")]
    Failed(#[from] AccessError),
}

/// Raw editor input could not be converted to the property type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("`{0}` is not an integer")]
    Integer(String),
    #[error("`{0}` is not a number")]
    Float(String),
    #[error("`{0}` is not `true` or `false`")]
    Boolean(String),
    #[error("`{input}` is not a variant of {type_name}")]
    Variant { input: String, type_name: String },
    #[error("values of type {0} cannot be edited")]
    Unsupported(String),
}

/// Any failure inside a bind, push or edit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("no property named `{0}`")]
    UnknownProperty(String),
    #[error("property `{0}` is read-only")]
    ReadOnly(String),
    #[error("property `{name}` has no choice {index}")]
    NoSuchChoice { name: String, index: usize },
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Loading configuration or metadata from disk or JSON failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;
