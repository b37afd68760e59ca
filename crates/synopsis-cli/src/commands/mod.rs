//! Command implementations.

pub mod schema;
pub mod show;
