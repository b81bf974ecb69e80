use alloc::boxed::Box;
use alloc::vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Builtin

/// A non-class type a property can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Bool,
    Int,
    Float,
    String,
    /// An ordered list or keyed mapping.
    Array,
    /// Anything, including null.
    Mixed,
}

impl Builtin {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Mixed => "mixed",
        }
    }
}

// -----------------------------------------------------------------------------
// TypeRef

/// One alternative of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Builtin(Builtin),
    Class(&'static str),
    /// The class declaring the property.
    SelfClass,
}

impl TypeRef {
    #[inline]
    pub const fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => f.write_str(builtin.name()),
            Self::Class(name) => f.write_str(name),
            Self::SelfClass => f.write_str("self"),
        }
    }
}

// -----------------------------------------------------------------------------
// DeclaredType

/// The declared type of a property: one or more alternatives plus nullability.
///
/// A property without a [`DeclaredType`] is untyped.
///
/// # Example
///
/// ```
/// use ix_meta::info::{Builtin, DeclaredType, TypeRef};
///
/// let ty = DeclaredType::class("NestedDTO").nullable();
/// assert_eq!(ty.to_string(), "?NestedDTO");
///
/// let ty = DeclaredType::union([TypeRef::Class("A"), TypeRef::Builtin(Builtin::Int)]);
/// assert!(ty.is_union());
/// assert_eq!(ty.to_string(), "A|int");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    alternatives: Box<[TypeRef]>,
    nullable: bool,
}

impl DeclaredType {
    fn single(ty: TypeRef) -> Self {
        Self {
            alternatives: vec![ty].into_boxed_slice(),
            nullable: false,
        }
    }

    pub fn builtin(builtin: Builtin) -> Self {
        Self::single(TypeRef::Builtin(builtin))
    }

    pub fn class(name: &'static str) -> Self {
        Self::single(TypeRef::Class(name))
    }

    pub fn self_class() -> Self {
        Self::single(TypeRef::SelfClass)
    }

    /// Creates a union of the given alternatives.
    pub fn union(alternatives: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            alternatives: alternatives.into_iter().collect(),
            nullable: false,
        }
    }

    /// Makes the type accept null.
    #[inline]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[inline]
    pub fn alternatives(&self) -> &[TypeRef] {
        &self.alternatives
    }

    /// Returns `true` if null is explicitly allowed or implied by `mixed`.
    pub fn allows_null(&self) -> bool {
        self.nullable
            || self
                .alternatives
                .contains(&TypeRef::Builtin(Builtin::Mixed))
    }

    /// Returns `true` if more than one non-null alternative is declared.
    #[inline]
    pub fn is_union(&self) -> bool {
        self.alternatives.len() > 1
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable && !self.is_union() {
            f.write_str("?")?;
        }
        for (index, alternative) in self.alternatives.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{alternative}")?;
        }
        if self.nullable && self.is_union() {
            f.write_str("|null")?;
        }
        Ok(())
    }
}
