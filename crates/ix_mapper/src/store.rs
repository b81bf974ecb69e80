//! The object store collaborator used for references and identity mapping.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use ix_meta::access::{AccessError, Object};
use ix_meta::registry::ClassRegistry;
use ix_meta::value::{Value, ValueKind};
use thiserror::Error;

// -----------------------------------------------------------------------------
// Identifier

/// A record identifier as found in payloads and stores.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

impl TryFrom<&Value> for Identifier {
    type Error = ValueKind;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(id) => Ok(Self::Int(*id)),
            Value::Text(id) => Ok(Self::Text(id.clone())),
            other => Err(other.kind()),
        }
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        match id {
            Identifier::Int(id) => Self::Int(id),
            Identifier::Text(id) => Self::Text(id),
        }
    }
}

impl From<i64> for Identifier {
    #[inline]
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for Identifier {
    #[inline]
    fn from(id: &str) -> Self {
        Self::Text(String::from(id))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectStore

/// An error reported by an [`ObjectStore`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("cannot access record of `{class}`")]
    Access {
        class: &'static str,
        #[source]
        source: AccessError,
    },
    #[error("{0}")]
    Backend(String),
}

/// Finds, persists and flushes records.
///
/// [`persist`](Self::persist) only schedules a record; identifiers generated
/// by the store are assigned on [`flush`](Self::flush).
pub trait ObjectStore {
    /// Finds a record of `class`, or of one of its subclasses, by identifier.
    fn find(&self, class: &str, id: &Identifier) -> Option<Object>;

    /// Schedules `object` for storage. Persisting a known record does nothing.
    fn persist(&mut self, object: &Object) -> Result<(), StoreError>;

    /// Writes scheduled records.
    fn flush(&mut self) -> Result<(), StoreError>;
}

// -----------------------------------------------------------------------------
// MemoryStore

/// An in-memory [`ObjectStore`] with autoincrement integer identifiers.
///
/// Records are matched against the class hierarchy of the registry, so a
/// lookup by parent class or interface finds subclass records too.
///
/// # Example
///
/// ```
/// use ix_mapper::{Identifier, MemoryStore, ObjectStore};
/// use ix_meta::registry::ClassRegistry;
///
/// let registry = ClassRegistry::new();
/// let mut store = MemoryStore::new(&registry);
/// store.flush().unwrap();
/// assert!(store.find("Anything", &Identifier::Int(1)).is_none());
/// assert!(store.is_empty());
/// ```
pub struct MemoryStore<'r> {
    registry: &'r ClassRegistry,
    records: Vec<Object>,
    pending: Vec<Object>,
    next_id: i64,
}

impl<'r> MemoryStore<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self {
            registry,
            records: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds an already stored record, keeping its identifier.
    ///
    /// Later generated identifiers start above any integer id seen here.
    pub fn insert(&mut self, object: Object) {
        if let Ok(Value::Int(id)) = object.get("id") {
            self.next_id = self.next_id.max(id.saturating_add(1));
        }
        if !self.knows(&object) {
            self.records.push(object);
        }
    }

    /// Returns `true` if `object` is stored or scheduled.
    pub fn knows(&self, object: &Object) -> bool {
        self.records
            .iter()
            .chain(&self.pending)
            .any(|known| known.ptr_eq(object))
    }

    /// Iterates flushed records in storage order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &Object> {
        self.records.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ObjectStore for MemoryStore<'_> {
    fn find(&self, class: &str, id: &Identifier) -> Option<Object> {
        self.records
            .iter()
            .filter(|record| self.registry.is_subclass_of(record.class_name(), class))
            .find(|record| {
                record
                    .get("id")
                    .ok()
                    .and_then(|value| Identifier::try_from(&value).ok())
                    .is_some_and(|stored| stored == *id)
            })
            .cloned()
    }

    fn persist(&mut self, object: &Object) -> Result<(), StoreError> {
        if !self.knows(object) {
            self.pending.push(object.clone());
        }
        Ok(())
    }

    /// Assigns the next integer id to every scheduled record, overwriting
    /// whatever id the record was imported with.
    fn flush(&mut self) -> Result<(), StoreError> {
        for object in core::mem::take(&mut self.pending) {
            object
                .set("id", Value::Int(self.next_id))
                .map_err(|source| StoreError::Access {
                    class: object.class_name(),
                    source,
                })?;
            log::debug!("assigned id {} to new `{}` record", self.next_id, object.class_name());
            self.next_id += 1;
            self.records.push(object);
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
