//! Business logic services for the backend.
//!
//! - `auth` - Password hashing and credential checks for seeded accounts

pub mod auth;
