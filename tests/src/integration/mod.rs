//! Cross-crate integration tests.

pub mod ambient;
pub mod ordering;
