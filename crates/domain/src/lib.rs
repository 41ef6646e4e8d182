//! Domain layer for the ListShare backend.
//!
//! This crate contains:
//! - Domain models (users, shopping lists, items, shares, invitations)
//! - Pure business-logic services (list access resolution)

pub mod models;
pub mod services;
