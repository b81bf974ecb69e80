use crate::info::ClassInfo;

/// A class submitted for automatic registration.
///
/// Created by [`register_class!`](crate::register_class).
pub struct ClassRegistration {
    pub class_info: fn() -> ClassInfo,
}

inventory::collect!(ClassRegistration);

pub(super) fn registrations() -> impl Iterator<Item = &'static ClassRegistration> {
    inventory::iter::<ClassRegistration>.into_iter()
}

/// Submits a [`Class`](crate::info::Class) for
/// [`ClassRegistry::auto_register`](crate::registry::ClassRegistry::auto_register).
///
/// # Example
///
/// ```no_run
/// # use ix_meta::access::{AccessError, Entity};
/// # use ix_meta::info::{Class, ClassInfo};
/// # use ix_meta::registry::ClassRegistry;
/// # use ix_meta::value::Value;
/// #[derive(Default)]
/// struct Note;
///
/// # impl Entity for Note {
/// #     fn class_name(&self) -> &'static str { "Note" }
/// #     fn get(&self, p: &str) -> Result<Value, AccessError> { Err(AccessError::unknown(p)) }
/// #     fn set(&mut self, p: &str, _: Value) -> Result<(), AccessError> { Err(AccessError::unknown(p)) }
/// # }
/// impl Class for Note {
///     fn class_info() -> ClassInfo {
///         ClassInfo::concrete::<Self>("Note")
///     }
/// }
///
/// ix_meta::register_class!(Note);
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.auto_register());
/// assert!(registry.contains("Note"));
/// ```
#[macro_export]
macro_rules! register_class {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ClassRegistration {
                class_info: <$ty as $crate::info::Class>::class_info,
            }
        }
    };
}
