//! Re-exports used by macros expanded in downstream crates.

#[cfg(feature = "auto_register")]
pub use inventory;
