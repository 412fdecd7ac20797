//! Shared types for the mab workspace.
//!
//! This crate provides the pieces every other crate agrees on:
//! - The unified error type with stable error codes
//! - The schema version stamped on JSON decision output

pub mod error;
pub mod schema;

pub use error::{Error, ErrorKind, Result};
pub use schema::SCHEMA_VERSION;
