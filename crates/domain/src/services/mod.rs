//! Pure business-logic services.

pub mod access;

pub use access::{effective_level, AccessLevel};
