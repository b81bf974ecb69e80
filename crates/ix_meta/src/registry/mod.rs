//! The class registry: a dispatch table from class name to [`ClassInfo`].
//!
//! ## auto_register
//!
//! With the `auto_register` feature, classes declared through
//! [`register_class!`](crate::register_class) are collected at link time
//! with the [`inventory`] crate and inserted by
//! [`ClassRegistry::auto_register`].
//!
//! [`ClassInfo`]: crate::info::ClassInfo

// -----------------------------------------------------------------------------
// Modules

mod class_registry;
mod system;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::ClassRegistry;
pub use system::{COLLECTION, DATE_TIME, DATE_TIME_IMMUTABLE, DATE_TIME_INTERFACE, ULID};

#[cfg(feature = "auto_register")]
pub use auto_register::ClassRegistration;
