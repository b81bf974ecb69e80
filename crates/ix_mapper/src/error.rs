use alloc::string::String;

use ix_meta::access::AccessError;
use ix_meta::value::Value;
use thiserror::Error;

use crate::store::{Identifier, StoreError};

/// Result type of the mapper.
pub type Result<T, E = Error> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// ErrorKind

/// The category of an [`Error`].
///
/// Every error aborts the current top-level import or export call; the kind
/// only tells callers where to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A collaborator was not configured before it was needed.
    Configuration,
    /// Class metadata forbids the operation.
    Schema,
    /// The payload is not the expected container.
    Shape,
    /// Null for a property that does not accept it.
    NullPolicy,
    /// A referenced record could not be resolved.
    Reference,
    /// No recognized value shape matched.
    UnknownShape,
    /// The object store or the property accessor failed.
    Store,
}

// -----------------------------------------------------------------------------
// Error

/// An error raised by the [`Exporter`](crate::Exporter) or the
/// [`Importer`](crate::Importer).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("found identifier {id} for `{class}`, but no object store is set to find it")]
    ReferenceWithoutStore { class: String, id: Identifier },
    #[error("an object store must be set before {operation}")]
    MissingObjectStore { operation: &'static str },
    #[error("an object store must be set to use identity mapping")]
    IdentityMappingWithoutStore,

    #[error("no entity class given to instantiate the data: {data}")]
    NoEntityClass { data: Value },
    #[error("class `{0}` does not exist")]
    UnknownClass(String),
    #[error("cannot create an instance of the interface `{0}`, concrete class needed")]
    InterfaceNotInstantiable(String),
    #[error("cannot create an instance of the abstract class `{0}`, concrete class needed")]
    AbstractNotInstantiable(String),
    #[error("class `{0}` has no constructor")]
    NotConstructible(String),
    #[error("cannot import `{class}::{property}`, found ambiguous union type `{ty}`")]
    AmbiguousUnion {
        class: String,
        property: String,
        ty: String,
    },
    #[error("don't know how to export instance of `{0}`, it has no exportable properties")]
    NotExportable(String),
    #[error("cannot reference `{class}` by `{identifier}`, that property is not exported")]
    MissingIdentifier { class: String, identifier: String },

    #[error("given `_entityClass` `{given}` is not a subclass/implementation of `{expected}`")]
    SubclassMismatch { given: String, expected: String },
    #[error("`{class}::{property}` expects a list but it is no list: {value}")]
    NotAList {
        class: String,
        property: String,
        value: Value,
    },
    #[error("`{class}::{property}` is marked as list of `{list_of}` but found an instance of `{found}`")]
    ListElementMismatch {
        class: String,
        property: String,
        list_of: String,
        found: String,
    },
    #[error("collection should contain instances of `{expected}` but found `{found}`")]
    CollectionElementMismatch { expected: String, found: String },
    #[error(
        "don't know how to import collection element {value}: it is neither a mapping nor an object, \
         or no element class is declared to resolve it as a reference"
    )]
    InvalidCollectionElement { value: Value },
    #[error("expected the mapping representation of `{class}`, found {value}")]
    NotAMapping { class: String, value: Value },

    #[error("found null for `{class}::{property}`, but the property is not nullable")]
    NotNullable { class: String, property: String },

    #[error("could not find referenced record `{class}#{id}`")]
    ReferenceNotFound { class: String, id: Identifier },
    #[error("identifier of referenced record `{class}#{id}` was not yet mapped, check import order")]
    ReferenceNotMapped { class: String, id: Identifier },

    #[error("don't know how to export `{class}::{property}`, it is an instance of `{found}` without exportable properties")]
    UnknownExport {
        class: String,
        property: String,
        found: String,
    },
    #[error("don't know how to import `{class}::{property}`")]
    UnknownImport { class: String, property: String },
    #[error("invalid date {value} for `{class}::{property}`")]
    InvalidDate {
        class: String,
        property: String,
        value: Value,
    },
    #[error("invalid ULID {value} for `{class}::{property}`")]
    InvalidUid {
        class: String,
        property: String,
        value: Value,
    },

    #[error("cannot access `{class}::{property}`")]
    Access {
        class: String,
        property: String,
        #[source]
        source: AccessError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub(crate) fn access(class: &str, property: &str, source: AccessError) -> Self {
        Self::Access {
            class: String::from(class),
            property: String::from(property),
            source,
        }
    }

    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ReferenceWithoutStore { .. }
            | Self::MissingObjectStore { .. }
            | Self::IdentityMappingWithoutStore => ErrorKind::Configuration,
            Self::NoEntityClass { .. }
            | Self::UnknownClass(_)
            | Self::InterfaceNotInstantiable(_)
            | Self::AbstractNotInstantiable(_)
            | Self::NotConstructible(_)
            | Self::AmbiguousUnion { .. }
            | Self::NotExportable(_)
            | Self::MissingIdentifier { .. } => ErrorKind::Schema,
            Self::SubclassMismatch { .. }
            | Self::NotAList { .. }
            | Self::ListElementMismatch { .. }
            | Self::CollectionElementMismatch { .. }
            | Self::InvalidCollectionElement { .. }
            | Self::NotAMapping { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidUid { .. } => ErrorKind::Shape,
            Self::NotNullable { .. } => ErrorKind::NullPolicy,
            Self::ReferenceNotFound { .. } | Self::ReferenceNotMapped { .. } => {
                ErrorKind::Reference
            }
            Self::UnknownExport { .. } | Self::UnknownImport { .. } => ErrorKind::UnknownShape,
            Self::Access { .. } | Self::Store(_) => ErrorKind::Store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use crate::store::Identifier;
    use alloc::string::{String, ToString};
    use ix_meta::value::Value;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::NotAList {
            class: String::from("ImportEntity"),
            property: String::from("dtoList"),
            value: Value::from("not-a-list"),
        };
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(
            err.to_string(),
            "`ImportEntity::dtoList` expects a list but it is no list: \"not-a-list\""
        );

        let err = Error::ReferenceNotMapped {
            class: String::from("AutoincrementEntity"),
            id: Identifier::Int(7),
        };
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().contains("`AutoincrementEntity#7`"));
    }
}
