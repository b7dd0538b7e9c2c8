//! Sitecheck Common Library
//!
//! Record model for the `/users` resource, fake record generation, shape
//! validation and the field-by-field comparator shared by the suites.

pub mod compare;
pub mod error;
pub mod generator;
pub mod types;
pub mod validate;

pub use compare::{compare_person, Mismatch};
pub use error::{Error, Result};
pub use generator::RecordGenerator;
pub use types::*;
pub use validate::validate_person;

/// Sitecheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
