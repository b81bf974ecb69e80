use super::{AccessError, Object};
use crate::value::Value;

/// Reads and writes a named property on an object.
///
/// The exporter and importer go through this capability rather than the
/// entity directly, so callers can substitute their own accessor.
pub trait PropertyAccessor {
    fn get_value(&self, object: &Object, property: &str) -> Result<Value, AccessError>;

    fn set_value(&self, object: &Object, property: &str, value: Value) -> Result<(), AccessError>;
}

/// The default accessor: delegates to the entity's own getters and setters.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityAccessor;

impl PropertyAccessor for EntityAccessor {
    #[inline]
    fn get_value(&self, object: &Object, property: &str) -> Result<Value, AccessError> {
        object.get(property)
    }

    #[inline]
    fn set_value(&self, object: &Object, property: &str, value: Value) -> Result<(), AccessError> {
        object.set(property, value)
    }
}
