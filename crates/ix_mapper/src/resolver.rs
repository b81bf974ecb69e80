use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use ix_meta::info::{
    Builtin, DeclaredType, ExportableEntity, ExportableProperty, ImportableEntity,
    ImportableProperty, TypeRef,
};
use ix_meta::registry::ClassRegistry;
use ix_utils::hash::HashMap;

use crate::{Error, Result};

// -----------------------------------------------------------------------------
// Resolved metadata

/// Exportable properties of a class, in declaration order.
pub type ExportableProperties = [(&'static str, ExportableProperty)];

/// An importable property with everything the importer needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportableField {
    pub name: &'static str,
    /// The class declaring the property, which `self` resolves to.
    pub owner: &'static str,
    pub declared_type: Option<DeclaredType>,
    pub directive: ImportableProperty,
}

/// Facts derived from a property's declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDetails {
    pub allows_null: bool,
    pub allows_array: bool,
    /// A scalar or array type, never an object.
    pub is_builtin: bool,
    pub is_union: bool,
    pub typename: Option<Builtin>,
    /// The class or interface to import into, if one can be determined.
    pub classname: Option<&'static str>,
}

impl TypeDetails {
    /// Derives the facts for `property` declared on `owner`.
    ///
    /// A union may name at most one class; a second one is ambiguous since
    /// the importer could not know which to instantiate.
    pub fn derive(owner: &'static str, property: &str, ty: Option<&DeclaredType>) -> Result<Self> {
        let Some(ty) = ty else {
            return Ok(Self {
                allows_null: true,
                allows_array: true,
                ..Self::default()
            });
        };

        let resolve = |alternative: &TypeRef| match alternative {
            TypeRef::Class(name) => Some(*name),
            TypeRef::SelfClass => Some(owner),
            TypeRef::Builtin(_) => None,
        };

        let mut details = Self {
            allows_null: ty.allows_null(),
            is_union: ty.is_union(),
            ..Self::default()
        };

        if ty.is_union() {
            for alternative in ty.alternatives() {
                if *alternative == TypeRef::Builtin(Builtin::Array) {
                    details.allows_array = true;
                    continue;
                }
                let Some(class) = resolve(alternative) else {
                    continue;
                };
                if details.classname.is_some() {
                    return Err(Error::AmbiguousUnion {
                        class: String::from(owner),
                        property: String::from(property),
                        ty: ty.to_string(),
                    });
                }
                details.classname = Some(class);
            }
        } else if let Some(alternative) = ty.alternatives().first() {
            match alternative {
                TypeRef::Builtin(builtin) => {
                    details.is_builtin = true;
                    details.typename = Some(*builtin);
                    details.allows_array = *builtin == Builtin::Array;
                }
                _ => details.classname = resolve(alternative),
            }
        }

        Ok(details)
    }
}

// -----------------------------------------------------------------------------
// Resolver

/// Computes and memoizes import/export metadata from a [`ClassRegistry`].
///
/// Class metadata is immutable once registered, so nothing is ever
/// invalidated. Share one resolver between exporters and importers to
/// share its tables.
pub struct Resolver<'r> {
    registry: &'r ClassRegistry,
    exportable: RefCell<HashMap<&'static str, Rc<ExportableProperties>>>,
    importable: RefCell<HashMap<&'static str, Rc<[ImportableField]>>>,
    type_details: RefCell<HashMap<(&'static str, &'static str), TypeDetails>>,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self {
            registry,
            exportable: RefCell::default(),
            importable: RefCell::default(),
            type_details: RefCell::default(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &'r ClassRegistry {
        self.registry
    }

    /// Returns the exportable properties of `class`, own ones first.
    ///
    /// Unknown classes have none.
    pub fn exportable_properties(&self, class: &str) -> Rc<ExportableProperties> {
        let Some(info) = self.registry.get(class) else {
            return Rc::from(Vec::new());
        };
        if let Some(cached) = self.exportable.borrow().get(info.name()) {
            return Rc::clone(cached);
        }

        let properties: Rc<ExportableProperties> = self
            .registry
            .properties(info.name())
            .into_iter()
            .filter_map(|(_, property)| {
                let directive = property.get_attribute::<ExportableProperty>()?;
                Some((property.name(), *directive))
            })
            .collect();

        self.exportable
            .borrow_mut()
            .insert(info.name(), Rc::clone(&properties));
        properties
    }

    /// Returns the importable properties of `class`, own ones first.
    ///
    /// Unknown classes have none.
    pub fn importable_properties(&self, class: &str) -> Rc<[ImportableField]> {
        let Some(info) = self.registry.get(class) else {
            return Rc::from(Vec::new());
        };
        if let Some(cached) = self.importable.borrow().get(info.name()) {
            return Rc::clone(cached);
        }

        let fields: Rc<[ImportableField]> = self
            .registry
            .properties(info.name())
            .into_iter()
            .filter_map(|(owner, property)| {
                let directive = property.get_attribute::<ImportableProperty>()?;
                Some(ImportableField {
                    name: property.name(),
                    owner,
                    declared_type: property.declared_type().cloned(),
                    directive: *directive,
                })
            })
            .collect();

        self.importable
            .borrow_mut()
            .insert(info.name(), Rc::clone(&fields));
        fields
    }

    /// Returns the type facts of a property of `class` or of its ancestors.
    pub fn type_details(&self, class: &str, property: &str) -> Result<TypeDetails> {
        let (owner, info) = self
            .registry
            .property(class, property)
            .ok_or_else(|| Error::UnknownImport {
                class: String::from(class),
                property: String::from(property),
            })?;
        self.memoized_details(owner, info.name(), info.declared_type())
    }

    pub(crate) fn field_details(&self, field: &ImportableField) -> Result<TypeDetails> {
        self.memoized_details(field.owner, field.name, field.declared_type.as_ref())
    }

    // Only successful derivations are cached, an ambiguous union fails on every use.
    fn memoized_details(
        &self,
        owner: &'static str,
        name: &'static str,
        ty: Option<&DeclaredType>,
    ) -> Result<TypeDetails> {
        if let Some(cached) = self.type_details.borrow().get(&(owner, name)) {
            return Ok(cached.clone());
        }
        let details = TypeDetails::derive(owner, name, ty)?;
        self.type_details
            .borrow_mut()
            .insert((owner, name), details.clone());
        Ok(details)
    }

    /// Returns `true` if `class` has at least one exportable property.
    pub fn is_exportable(&self, class: &str) -> bool {
        !self.exportable_properties(class).is_empty()
    }

    /// Returns `true` if `class` has at least one importable property.
    pub fn is_importable(&self, class: &str) -> bool {
        !self.importable_properties(class).is_empty()
    }

    /// Returns `true` if `class` or its nearest marked ancestor carries
    /// [`ExportableEntity`]. Eligibility is decided by properties, not markers.
    pub fn is_marked_exportable(&self, class: &str) -> bool {
        !self
            .registry
            .class_attribute::<ExportableEntity>(class, true)
            .is_none()
    }

    /// Returns `true` if `class` or its nearest marked ancestor carries
    /// [`ImportableEntity`].
    pub fn is_marked_importable(&self, class: &str) -> bool {
        !self
            .registry
            .class_attribute::<ImportableEntity>(class, true)
            .is_none()
    }
}

// -----------------------------------------------------------------------------
// Tests
