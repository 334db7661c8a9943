//! Core types shared by every layer of the generator.
//!
//! At the moment this is the error taxonomy and its user-facing rendering;
//! see [`error`] for details.

pub mod error;

pub use error::{ErrorContext, TechTreeError, user_friendly_error};
