use super::{CustomAttributes, DeclaredType};

/// Metadata of a single declared property.
#[derive(Debug)]
pub struct PropertyInfo {
    name: &'static str,
    ty: Option<DeclaredType>,
    custom_attributes: Option<CustomAttributes>,
}

impl PropertyInfo {
    /// Creates an untyped property.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ty: None,
            custom_attributes: None,
        }
    }

    /// Creates a property with the given declared type.
    #[inline]
    pub fn typed(name: &'static str, ty: DeclaredType) -> Self {
        Self::new(name).with_type(ty)
    }

    #[inline]
    pub fn with_type(mut self, ty: DeclaredType) -> Self {
        self.ty = Some(ty);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type, or `None` for an untyped property.
    #[inline]
    pub const fn declared_type(&self) -> Option<&DeclaredType> {
        self.ty.as_ref()
    }

    crate::info::impl_custom_attributes_fn!(custom_attributes);
}
