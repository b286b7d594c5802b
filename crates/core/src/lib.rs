//! Shared domain types and errors for the channelpush component.

pub mod error;
pub mod types;
