use alloc::vec::Vec;
use core::any::Any;

use ix_utils::hash::{Entry, FixedHashState, HashMap, HashSet};

use super::system::system_classes;
use crate::info::{AttributeMatch, Class, ClassInfo, PropertyInfo};

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of declared classes.
///
/// This is the central store of class metadata. The mapper resolves class
/// names found in payloads, walks the inheritance graph and reads property
/// directives exclusively through it.
///
/// # Example
///
/// ```
/// use ix_meta::info::ClassInfo;
/// use ix_meta::registry::{ClassRegistry, DATE_TIME_INTERFACE, DATE_TIME_IMMUTABLE};
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.is_subclass_of(DATE_TIME_IMMUTABLE, DATE_TIME_INTERFACE));
///
/// assert!(registry.insert(ClassInfo::interface("Shape")));
/// assert!(registry.insert(ClassInfo::abstract_class("Polygon").implements("Shape")));
/// assert!(!registry.insert(ClassInfo::interface("Shape")));
/// assert!(registry.is_subclass_of("Polygon", "Shape"));
/// ```
pub struct ClassRegistry {
    classes: HashMap<&'static str, ClassInfo>,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates an empty [`ClassRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            classes: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with the system classes registered:
    ///
    /// - `Collection`
    /// - `DateTimeInterface`, `DateTimeImmutable`, `DateTime`
    /// - `Ulid`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for info in system_classes() {
            registry.insert(info);
        }
        registry
    }

    /// Inserts a class.
    ///
    /// - If the name is already registered, nothing changes and `false` is returned.
    /// - Otherwise the class is inserted and `true` is returned.
    pub fn insert(&mut self, info: ClassInfo) -> bool {
        match self.classes.entry(info.name()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(info);
                true
            }
        }
    }

    /// Registers `T` under the name its [`ClassInfo`] declares.
    ///
    /// Returns `false` if that name is already registered.
    pub fn register<T: Class>(&mut self) -> bool {
        self.insert(T::class_info())
    }

    /// Automatically registers every class submitted with
    /// [`register_class!`](crate::register_class).
    ///
    /// Repeated calls will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration is available, that is, the
    /// `auto_register` feature is enabled. Otherwise does nothing and
    /// returns `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            for registration in super::auto_register::registrations() {
                let info = (registration.class_info)();
                if !self.insert(info) {
                    log::trace!("auto registration skipped an already registered class");
                }
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Iterates registered classes in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassInfo> {
        self.classes.values()
    }

    /// Iterates `class` followed by its registered parent chain.
    pub fn ancestors<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a ClassInfo> + use<'a> {
        let mut next = self.get(class);
        core::iter::from_fn(move || {
            let current = next?;
            next = current.parent().and_then(|parent| self.get(parent));
            Some(current)
        })
    }

    /// Returns `true` if `class` is `ancestor`, extends it, or implements it.
    ///
    /// Interfaces extending other interfaces are followed transitively.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        let mut visited = HashSet::<&str>::default();
        let mut pending = Vec::from([class]);
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(info) = self.get(current) {
                pending.extend(info.parent());
                pending.extend_from_slice(info.interfaces());
            }
        }
        false
    }

    /// Returns every property of `class`, own declarations first, then
    /// inherited ones, each paired with its declaring class.
    ///
    /// A redeclared property shadows the parent's declaration.
    pub fn properties(&self, class: &str) -> Vec<(&'static str, &PropertyInfo)> {
        let mut seen = HashSet::<&str>::default();
        let mut properties = Vec::new();
        for info in self.ancestors(class) {
            for property in info.properties() {
                if seen.insert(property.name()) {
                    properties.push((info.name(), property));
                }
            }
        }
        properties
    }

    /// Returns a property of `class` or of its ancestors, with its declaring class.
    pub fn property(&self, class: &str, name: &str) -> Option<(&'static str, &PropertyInfo)> {
        self.ancestors(class)
            .find_map(|info| Some((info.name(), info.property(name)?)))
    }

    /// Looks up a class attribute.
    ///
    /// With `inherit`, the nearest class in the parent chain carrying the
    /// attribute answers.
    pub fn class_attribute<T: Any>(&self, class: &str, inherit: bool) -> AttributeMatch<'_, T> {
        for info in self.ancestors(class) {
            let found = info.custom_attributes().find::<T>();
            if !found.is_none() || !inherit {
                return found;
            }
        }
        AttributeMatch::None
    }

    /// Looks up an attribute on a property of `class` or of its ancestors.
    pub fn property_attribute<T: Any>(&self, class: &str, property: &str) -> AttributeMatch<'_, T> {
        match self.property(class, property) {
            Some((_, info)) => info.custom_attributes().find::<T>(),
            None => AttributeMatch::None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
