use std::fmt;

use thiserror::Error;

use crate::data_type::DataType;

/// The slot a failed read was addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Object property.
    Key(String),
    /// Array element.
    Index(usize),
    /// Value reached through a JSON Pointer.
    Pointer(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Key(key) => write!(f, "key {key:?}"),
            Location::Index(index) => write!(f, "index {index}"),
            Location::Pointer(pointer) => write!(f, "pointer {pointer:?}"),
        }
    }
}

impl From<&str> for Location {
    fn from(key: &str) -> Self {
        Location::Key(key.to_string())
    }
}

impl From<usize> for Location {
    fn from(index: usize) -> Self {
        Location::Index(index)
    }
}

/// Errors raised by typed reads, writes and parsing.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The requested Rust type has no accessor mapping.
    #[error("Cannot get object of type {0}")]
    UnsupportedType(&'static str),

    /// The stored value cannot be read as the requested type.
    #[error("Unable to resolve value at {location} to type {expected}: found {found}")]
    TypeMismatch {
        location: Location,
        expected: &'static str,
        found: DataType,
    },

    #[error("No value present for key {0:?}")]
    MissingKey(String),

    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// NaN and infinities have no JSON representation.
    #[error("Cannot store non-finite number {0}")]
    NonFiniteNumber(f64),

    #[error("Expected a JSON {expected} document, found {found}")]
    UnexpectedRoot {
        expected: DataType,
        found: DataType,
    },

    #[error("No value found at pointer {0:?}")]
    PathNotFound(String),

    #[error("Invalid JSON pointer {0:?}")]
    InvalidPointer(String),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl JsonError {
    /// Whether this error reports an absent slot rather than a bad value.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            JsonError::MissingKey(_) | JsonError::IndexOutOfRange { .. } | JsonError::PathNotFound(_)
        )
    }
}
