//! ProShop Core - Shared domain types.
//!
//! This crate provides the types shared by every ProShop component:
//! - `api` - REST backend serving the product catalog
//! - `client` - State container and views that consume the API
//! - `cli` - Migrations, seeding and catalog browsing
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. The optional `postgres` feature adds `sqlx`
//! encoding for the id and email newtypes.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, emails, products and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
