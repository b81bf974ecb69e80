//! The bidirectional mapping engine between entities and their plain representation.
//!
//! ## Menu
//!
//! - [`Resolver`]: memoized import/export metadata and per-property type facts.
//! - [`PropertyFilter`] and [`FilterMode`]: include/exclude lists, optionally nested.
//! - [`Exporter`]: object graph to plain [`Mapping`](ix_meta::Mapping).
//! - [`Importer`]: plain mapping back to objects, with reference resolution and
//!   identity mapping through an [`ObjectStore`].
//!
//! # Example
//!
//! ```
//! use ix_mapper::{Exporter, FilterMode, PropertyFilter, Resolver};
//! use ix_meta::registry::ClassRegistry;
//!
//! let registry = ClassRegistry::new();
//! let resolver = Resolver::new(&registry);
//! let exporter = Exporter::new(&resolver);
//!
//! let values = exporter
//!     .export_collection(&[1.into(), "two".into()], PropertyFilter::EMPTY, FilterMode::Include)
//!     .unwrap();
//! assert_eq!(values.len(), 2);
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod export;
mod filter;
mod import;
mod resolver;
mod store;

#[cfg(test)]
mod test_fixtures;

// -----------------------------------------------------------------------------
// Exports

pub use error::{Error, ErrorKind, Result};
pub use export::Exporter;
pub use filter::{FilterMode, PropertyFilter};
pub use import::{IdentityMap, Importer};
pub use resolver::{ExportableProperties, ImportableField, Resolver, TypeDetails};
pub use store::{Identifier, MemoryStore, ObjectStore, StoreError};
