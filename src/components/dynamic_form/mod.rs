//! Configuration-driven form generation.
//!
//! Compiles an ordered list of field descriptors into:
//! - typed input controls (one renderer per field kind)
//! - an initial-values record
//! - a validation schema executed on change, blur and submit
//!
//! bound together into a submittable form with per-field error display.

pub mod engine;
pub mod fields;
pub mod form;
pub mod schema;
pub mod types;

pub use engine::*;
pub use form::*;
pub use schema::*;
pub use types::*;
