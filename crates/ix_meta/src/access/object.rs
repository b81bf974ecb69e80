use alloc::rc::Rc;
use core::any::Any;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use super::AccessError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Entity

/// A user type whose properties can be read and written by name.
///
/// Implementations decide what "the property" means: a plain field, or a
/// getter/setter pair that transforms the value on the way through.
///
/// # Example
///
/// ```
/// use ix_meta::access::{AccessError, Entity};
/// use ix_meta::value::{FromValue, Value};
///
/// #[derive(Default)]
/// struct Tag {
///     label: String,
/// }
///
/// impl Entity for Tag {
///     fn class_name(&self) -> &'static str {
///         "Tag"
///     }
///
///     fn get(&self, property: &str) -> Result<Value, AccessError> {
///         match property {
///             "label" => Ok(Value::from(self.label.clone())),
///             _ => Err(AccessError::unknown(property)),
///         }
///     }
///
///     fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
///         match property {
///             "label" => self.label = String::from_value(value)?,
///             _ => return Err(AccessError::unknown(property)),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Entity: Any {
    /// Returns the registered name of the concrete class.
    fn class_name(&self) -> &'static str;

    fn get(&self, property: &str) -> Result<Value, AccessError>;

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError>;
}

// -----------------------------------------------------------------------------
// Object

/// A shared handle to an [`Entity`].
///
/// Cloning the handle does not clone the entity. Equality is identity.
#[derive(Clone)]
pub struct Object(Rc<RefCell<dyn Entity>>);

impl Object {
    /// Moves `entity` behind a new shared handle.
    pub fn new<T: Entity>(entity: T) -> Self {
        Self(Rc::new(RefCell::new(entity)))
    }

    /// Returns the registered name of the concrete class.
    ///
    /// Returns `"?"` while the entity is mutably borrowed.
    pub fn class_name(&self) -> &'static str {
        self.0.try_borrow().map_or("?", |entity| entity.class_name())
    }

    pub fn get(&self, property: &str) -> Result<Value, AccessError> {
        let entity = self.0.try_borrow().map_err(|_| AccessError::Borrowed)?;
        entity.get(property)
    }

    pub fn set(&self, property: &str, value: Value) -> Result<(), AccessError> {
        let mut entity = self.0.try_borrow_mut().map_err(|_| AccessError::Borrowed)?;
        entity.set(property, value)
    }

    /// Returns `true` if both handles point to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: Entity>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrows the entity as `T`, if that is its concrete type.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently mutably borrowed.
    pub fn downcast_ref<T: Entity>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.0.borrow(), |entity| {
            (entity as &dyn Any).downcast_ref::<T>()
        })
        .ok()
    }

    /// Mutably borrows the entity as `T`, if that is its concrete type.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently borrowed.
    pub fn downcast_mut<T: Entity>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.0.borrow_mut(), |entity| {
            (entity as &mut dyn Any).downcast_mut::<T>()
        })
        .ok()
    }
}

impl PartialEq for Object {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object({})", self.class_name())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Entity, Object};
    use crate::access::AccessError;
    use crate::value::{FromValue, Value};

    #[derive(Default)]
    struct Counter {
        hits: i64,
    }

    impl Entity for Counter {
        fn class_name(&self) -> &'static str {
            "Counter"
        }

        fn get(&self, property: &str) -> Result<Value, AccessError> {
            match property {
                "hits" => Ok(Value::Int(self.hits)),
                _ => Err(AccessError::unknown(property)),
            }
        }

        fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
            match property {
                "hits" => self.hits = i64::from_value(value)?,
                _ => return Err(AccessError::unknown(property)),
            }
            Ok(())
        }
    }

    #[test]
    fn handles_share_the_instance() {
        let a = Object::new(Counter::default());
        let b = a.clone();
        b.set("hits", Value::Int(3)).unwrap();

        assert_eq!(a.get("hits"), Ok(Value::Int(3)));
        assert_eq!(a, b);
        assert_ne!(a, Object::new(Counter::default()));
    }

    #[test]
    fn downcast_to_concrete() {
        let object = Object::new(Counter { hits: 2 });
        assert!(object.is::<Counter>());
        object.downcast_mut::<Counter>().unwrap().hits += 1;
        assert_eq!(object.downcast_ref::<Counter>().unwrap().hits, 3);
        assert_eq!(alloc::format!("{object:?}"), "object(Counter)");
    }

    #[test]
    fn unknown_property() {
        let object = Object::new(Counter::default());
        assert_eq!(object.get("nope"), Err(AccessError::unknown("nope")));
        assert!(matches!(
            object.set("hits", Value::from("x")),
            Err(AccessError::TypeMismatch { expected: "int", .. })
        ));
    }
}
