//! Conversions between Rust field types and [`Value`].

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset, Utc};
use ulid::Ulid;

use super::{Mapping, Value};
use crate::access::{AccessError, Object};

// -----------------------------------------------------------------------------
// Into Value

macro_rules! impl_from_value_variant {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_value_variant! {
    bool => Bool,
    i64 => Int,
    f64 => Float,
    String => Text,
    DateTime<FixedOffset> => DateTime,
    Ulid => Ulid,
    Mapping => Map,
    Object => Object,
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Fallible conversion from a [`Value`] into a typed entity field.
///
/// Entity setters use this to reject values of the wrong shape with an
/// [`AccessError::TypeMismatch`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, AccessError>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, AccessError> {
        Ok(value)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $expected:literal, $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, AccessError> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(AccessError::mismatch($expected, &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => "bool", Bool,
    i64 => "int", Int,
    String => "string", Text,
    DateTime<FixedOffset> => "datetime", DateTime,
    Ulid => "ulid", Ulid,
    Mapping => "map", Map,
    Object => "object", Object,
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Float(inner) => Ok(inner),
            Value::Int(inner) => Ok(inner as f64),
            other => Err(AccessError::mismatch("float", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Map(map) => map.into_values().map(T::from_value).collect(),
            other => Err(AccessError::mismatch("list", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FromValue;
    use crate::access::AccessError;
    use crate::value::{Value, ValueKind};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn optional_fields_accept_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::Int(4)), Ok(Some(4)));
        assert_eq!(Value::from(None::<String>), Value::Null);
    }

    #[test]
    fn mismatch_reports_found_kind() {
        let err = String::from_value(Value::Int(1)).unwrap_err();
        assert_eq!(err, AccessError::TypeMismatch { expected: "string", found: ValueKind::Int });
    }

    #[test]
    fn lists_convert_elementwise() {
        let value = Value::from(vec!["a", "b"]);
        let items = Vec::<String>::from_value(value).unwrap();
        assert_eq!(items, vec![String::from("a"), String::from("b")]);

        assert!(Vec::<i64>::from_value(Value::from(vec!["a"])).is_err());
    }
}
