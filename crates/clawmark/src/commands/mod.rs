//! Command implementations.

pub mod build;
pub mod og;
