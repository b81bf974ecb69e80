use alloc::string::String;

use thiserror::Error;

use crate::value::{Value, ValueKind};

/// An error returned by entity getters and setters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("no accessible property named `{0}`")]
    UnknownProperty(String),
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: ValueKind,
    },
    #[error("property `{0}` is read-only")]
    ReadOnly(String),
    #[error("the object is already borrowed")]
    Borrowed,
}

impl AccessError {
    #[inline]
    pub fn unknown(property: &str) -> Self {
        Self::UnknownProperty(String::from(property))
    }

    #[inline]
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}
