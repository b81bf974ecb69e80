use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use ix_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// CustomAttributes

/// A collection of attributes attached to a class or a property.
///
/// Attributes are grouped by their [`TypeId`]. Unlike most metadata keyed
/// this way, an attribute type may be repeated: every insertion is kept, in
/// insertion order.
///
/// # Example
///
/// ```
/// use ix_meta::info::{AttributeMatch, CustomAttributes};
///
/// struct Label(&'static str);
///
/// let attrs = CustomAttributes::new()
///     .with_attribute(Label("a"))
///     .with_attribute(Label("b"));
///
/// assert_eq!(attrs.get::<Label>().unwrap().0, "a");
/// assert!(matches!(attrs.find::<Label>(), AttributeMatch::Multiple(v) if v.len() == 2));
/// assert!(attrs.find::<u8>().is_none());
/// ```
#[derive(Default)]
pub struct CustomAttributes {
    attributes: TypeIdMap<Vec<Box<dyn Any + Send + Sync>>>,
}

impl CustomAttributes {
    /// A static reference to an empty [`CustomAttributes`].
    pub(crate) const EMPTY: &'static Self = &Self::new();

    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: TypeIdMap::new(),
        }
    }

    /// Adds an attribute, keeping any earlier instances of the same type.
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.attributes
            .get_or_insert(TypeId::of::<T>(), Vec::new)
            .push(Box::new(value));
    }

    /// Returns `true` if at least one attribute of type `T` is present.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.attributes.contains(&TypeId::of::<T>())
    }

    /// Returns the first attribute of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.iter::<T>().next()
    }

    /// Iterates every attribute of type `T` in insertion order.
    pub fn iter<T: Any>(&self) -> impl Iterator<Item = &T> {
        self.attributes
            .get_type::<T>()
            .into_iter()
            .flatten()
            .filter_map(|attr| attr.downcast_ref::<T>())
    }

    /// Looks up attributes of type `T`, distinguishing absent, single and repeated.
    pub fn find<T: Any>(&self) -> AttributeMatch<'_, T> {
        AttributeMatch::from_vec(self.iter::<T>().collect())
    }

    /// Returns the number of stored attributes, counting repetitions.
    pub fn len(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl core::fmt::Debug for CustomAttributes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CustomAttributes")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AttributeMatch

/// The result of an attribute lookup.
///
/// A repeatable attribute yields [`Multiple`](Self::Multiple) when it is
/// declared more than once; callers decide whether that is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatch<'a, T> {
    None,
    Single(&'a T),
    Multiple(Vec<&'a T>),
}

impl<'a, T> AttributeMatch<'a, T> {
    pub fn from_vec(mut found: Vec<&'a T>) -> Self {
        match found.len() {
            0 => Self::None,
            1 => Self::Single(found.remove(0)),
            _ => Self::Multiple(found),
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the first match, if any.
    pub fn first(&self) -> Option<&'a T> {
        match self {
            Self::None => None,
            Self::Single(attr) => Some(*attr),
            Self::Multiple(attrs) => attrs.first().copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Multiple(attrs) => attrs.len(),
        }
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `custom_attributes`, `with_attribute` and the attribute getters.
macro_rules! impl_custom_attributes_fn {
    ($field:ident) => {
        #[inline]
        pub fn custom_attributes(&self) -> &$crate::info::CustomAttributes {
            match &self.$field {
                Some(attrs) => attrs,
                None => $crate::info::CustomAttributes::EMPTY,
            }
        }

        /// Attaches an attribute. Repeated types accumulate.
        pub fn with_attribute<T: ::core::any::Any + Send + Sync>(mut self, value: T) -> Self {
            self.$field.get_or_insert_default().push(value);
            self
        }

        /// Returns the first attribute of type `T`, if present.
        pub fn get_attribute<T: ::core::any::Any>(&self) -> Option<&T> {
            self.custom_attributes().get::<T>()
        }

        /// Returns `true` if it carries an attribute of type `T`.
        pub fn has_attribute<T: ::core::any::Any>(&self) -> bool {
            self.custom_attributes().contains::<T>()
        }
    };
}

pub(crate) use impl_custom_attributes_fn;
