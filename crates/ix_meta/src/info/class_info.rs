use alloc::vec::Vec;

use ix_utils::hash::HashMap;

use super::{CustomAttributes, PropertyInfo};
use crate::access::{Entity, Object};

// -----------------------------------------------------------------------------
// ClassKind

/// Whether a class can be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Concrete,
    Abstract,
    Interface,
}

/// Creates a fresh, default-initialized instance of a class.
pub type Constructor = fn() -> Object;

fn construct<T: Entity + Default>() -> Object {
    Object::new(T::default())
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Metadata of a declared class: hierarchy, own properties and attributes.
///
/// Only the properties declared by this class are stored here. Inherited
/// properties and attributes are resolved through the
/// [`ClassRegistry`](crate::registry::ClassRegistry).
///
/// # Example
///
/// ```
/// use ix_meta::info::{Builtin, ClassInfo, DeclaredType, ExportableProperty, PropertyInfo};
///
/// let info = ClassInfo::abstract_class("Base")
///     .implements("DtoInterface")
///     .with_property(
///         PropertyInfo::typed("id", DeclaredType::builtin(Builtin::Int))
///             .with_attribute(ExportableProperty::new()),
///     );
///
/// assert!(info.is_abstract());
/// assert_eq!(info.property("id").unwrap().name(), "id");
/// assert!(info.constructor().is_none());
/// ```
#[derive(Debug)]
pub struct ClassInfo {
    name: &'static str,
    kind: ClassKind,
    parent: Option<&'static str>,
    interfaces: Vec<&'static str>,
    constructor: Option<Constructor>,
    properties: Vec<PropertyInfo>,
    property_indices: HashMap<&'static str, usize>,
    custom_attributes: Option<CustomAttributes>,
}

impl ClassInfo {
    fn with_kind(name: &'static str, kind: ClassKind, constructor: Option<Constructor>) -> Self {
        Self {
            name,
            kind,
            parent: None,
            interfaces: Vec::new(),
            constructor,
            properties: Vec::new(),
            property_indices: HashMap::default(),
            custom_attributes: None,
        }
    }

    /// Creates an instantiable class constructed through [`Default`].
    pub fn concrete<T: Entity + Default>(name: &'static str) -> Self {
        Self::with_kind(name, ClassKind::Concrete, Some(construct::<T>))
    }

    /// Creates a concrete class the mapper never constructs itself,
    /// such as the value classes the mapper converts natively.
    pub fn opaque(name: &'static str) -> Self {
        Self::with_kind(name, ClassKind::Concrete, None)
    }

    pub fn abstract_class(name: &'static str) -> Self {
        Self::with_kind(name, ClassKind::Abstract, None)
    }

    pub fn interface(name: &'static str) -> Self {
        Self::with_kind(name, ClassKind::Interface, None)
    }

    /// Sets the parent class.
    #[inline]
    pub fn extends(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Adds an implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, interface: &'static str) -> Self {
        if !self.interfaces.contains(&interface) {
            self.interfaces.push(interface);
        }
        self
    }

    /// Declares a property. Redeclaring a name replaces the earlier entry
    /// in place.
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        match self.property_indices.get(property.name()) {
            Some(&index) => self.properties[index] = property,
            None => {
                self.property_indices
                    .insert(property.name(), self.properties.len());
                self.properties.push(property);
            }
        }
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    #[inline]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }

    #[inline]
    pub const fn is_abstract(&self) -> bool {
        matches!(self.kind, ClassKind::Abstract)
    }

    #[inline]
    pub const fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    #[inline]
    pub fn interfaces(&self) -> &[&'static str] {
        &self.interfaces
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    /// Creates a default instance, if the class is constructible.
    pub fn instantiate(&self) -> Option<Object> {
        self.constructor.map(|construct| construct())
    }

    /// Returns an own property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.property_indices
            .get(name)
            .map(|&index| &self.properties[index])
    }

    /// Iterates own properties in declaration order.
    #[inline]
    pub fn properties(&self) -> core::slice::Iter<'_, PropertyInfo> {
        self.properties.iter()
    }

    crate::info::impl_custom_attributes_fn!(custom_attributes);
}

// -----------------------------------------------------------------------------
// Class

/// A Rust type that describes itself as a registered class.
///
/// See [`ClassRegistry::register`](crate::registry::ClassRegistry::register)
/// and the `register_class!` macro.
pub trait Class: Entity + Default {
    fn class_info() -> ClassInfo;
}
