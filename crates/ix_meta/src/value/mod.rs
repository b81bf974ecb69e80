//! The plain representation exchanged by the exporter and the importer.
//!
//! A [`Value`] is either plain data (null, scalars, lists, mappings) or a
//! runtime value the mapper knows how to encode (dates, ULIDs, objects).
//! Plain data round-trips through any serde format; objects must be
//! exported first.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod date;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use convert::FromValue;
pub use date::{ATOM_FORMAT, format_atom, parse_datetime};

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use ix_utils::hash::FixedHashState;
use ulid::Ulid;

use crate::access::Object;

/// Reserved mapping key naming the concrete class of an exported object.
pub const ENTITY_CLASS_KEY: &str = "_entityClass";

/// A named mapping of the plain representation.
///
/// Keys iterate in insertion order, so keyed collections and exported
/// objects keep the order they were built or parsed in.
pub type Mapping = IndexMap<String, Value, FixedHashState>;

// -----------------------------------------------------------------------------
// Value

/// A value read from, or written to, an entity property.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<FixedOffset>),
    Ulid(Ulid),
    /// An ordered collection, possibly mixing scalars and objects.
    List(Vec<Value>),
    /// An opaque named mapping, or the plain form of an exported object.
    Map(Mapping),
    Object(Object),
}

/// The discriminant of a [`Value`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    DateTime,
    Ulid,
    List,
    Map,
    Object,
}

impl ValueKind {
    /// Returns the lowercase name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "string",
            Self::DateTime => "datetime",
            Self::Ulid => "ulid",
            Self::List => "list",
            Self::Map => "map",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the [`ValueKind`] of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Ulid(_) => ValueKind::Ulid,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for the shapes that can act as a record identifier.
    #[inline]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Text(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the `_entityClass` entry if this is a mapping carrying one.
    ///
    /// An explicit `null` entry counts as absent.
    pub fn entity_class(&self) -> Option<&Value> {
        self.as_map()?
            .get(ENTITY_CLASS_KEY)
            .filter(|class| !class.is_null())
    }
}

/// Renders the literal value, JSON style, for error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::DateTime(date) => write!(f, "\"{}\"", format_atom(date)),
            Self::Ulid(ulid) => write!(f, "\"{ulid}\""),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key:?}:{item}")?;
                }
                f.write_str("}")
            }
            Self::Object(object) => write!(f, "{object:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ENTITY_CLASS_KEY, Mapping, Value, ValueKind};
    use alloc::string::{String, ToString};
    use alloc::vec;

    #[test]
    fn display_quotes_text() {
        assert_eq!(Value::from("not-a-list").to_string(), "\"not-a-list\"");
        assert_eq!(Value::Null.to_string(), "null");

        let list = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(list.to_string(), "[1,\"a\"]");
    }

    #[test]
    fn entity_class_lookup() {
        let mut map = Mapping::default();
        map.insert(String::from(ENTITY_CLASS_KEY), Value::from("NestedDTO"));
        let value = Value::Map(map);

        assert_eq!(value.entity_class(), Some(&Value::from("NestedDTO")));
        assert_eq!(Value::Int(3).entity_class(), None);
        assert_eq!(value.kind(), ValueKind::Map);
        assert_eq!(ValueKind::Text.to_string(), "string");
    }

    #[test]
    fn null_entity_class_is_absent() {
        let mut map = Mapping::default();
        map.insert(String::from(ENTITY_CLASS_KEY), Value::Null);
        map.insert(String::from("a"), Value::Int(1));

        assert_eq!(Value::Map(map).entity_class(), None);
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn mapping_keeps_insertion_order() {
        let mut map = Mapping::default();
        for key in ["10", "2", "b", "a"] {
            map.insert(String::from(key), Value::from(key));
        }

        let keys: alloc::vec::Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["10", "2", "b", "a"]);
    }
}
