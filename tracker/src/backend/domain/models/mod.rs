//! Entity rules for each persisted kind, plus the shared validation error.
//!
//! The record types themselves live in the `shared` crate; this module
//! implements [`Entity`](crate::backend::storage::Entity) for them.

pub mod health_record;
pub mod profile;
pub mod reminder;
pub mod validation;

pub use validation::ValidationError;
