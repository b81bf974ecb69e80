//! Reading and writing entity properties by name.
//!
//! Entities are shared, mutable object graphs: [`Object`] is a cheap
//! reference-counted handle, and identity (not structure) is what matters
//! when the same instance is reached twice.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod error;
mod object;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{EntityAccessor, PropertyAccessor};
pub use error::AccessError;
pub use object::{Entity, Object};
