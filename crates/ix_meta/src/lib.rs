//! Metadata provider for the `ix` object graph mapper.
//!
//! This crate describes *what* can be imported and exported; the mapping
//! algorithms themselves live in `ix_mapper`.
//!
//! ## Menu
//!
//! - [`value`]: the plain representation ([`Value`], [`Mapping`]) and its serde support.
//! - [`access`]: the [`Entity`] trait, shared [`Object`] handles and the
//!   [`PropertyAccessor`](access::PropertyAccessor) capability.
//! - [`info`]: declared class/property metadata and the import/export directives.
//! - [`registry`]: the [`ClassRegistry`](registry::ClassRegistry), a dispatch
//!   table from class name to [`ClassInfo`](info::ClassInfo).
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Extern Self

// `register_class!` expands to `ix_meta::...` paths, which must also
// resolve inside this crate's own tests.
extern crate self as ix_meta;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod info;
pub mod registry;
pub mod value;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use access::{Entity, Object};
pub use value::{Mapping, Value};
