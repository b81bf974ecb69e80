//! Declared metadata: classes, properties, their types and directives.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod class_info;
mod declared_type;
mod directives;
mod property_info;

pub(crate) use attributes::impl_custom_attributes_fn;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::{AttributeMatch, CustomAttributes};
pub use class_info::{Class, ClassInfo, ClassKind, Constructor};
pub use declared_type::{Builtin, DeclaredType, TypeRef};
pub use directives::{ExportableEntity, ExportableProperty, ImportableEntity, ImportableProperty};
pub use property_info::PropertyInfo;
