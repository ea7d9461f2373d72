//! Core types, attribute store, and errors for ick markup expansion.
//!
//! This crate provides the foundational types shared by the parser and the
//! expander:
//! - Parsed attributes and the closed attribute value type
//! - The per-component attribute store with its precedence rules
//! - HTML name validation
//! - Error types

pub mod attribute;
pub mod errors;
pub mod names;
pub mod property;
pub mod store;
pub mod types;

pub use attribute::*;
pub use errors::*;
pub use store::*;
pub use types::*;
