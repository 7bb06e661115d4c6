//! ProShop REST backend.
//!
//! Serves the product catalog over JSON at `/api/products`, backed by
//! `PostgreSQL` or, when no database is configured, an in-memory store
//! loaded with the sample catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

pub use routes::app;
