//! Core types for ProShop.
//!
//! Type-safe wrappers and records for the storefront domain.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{NewProduct, Product, ProductUpdate, ValidationError};
pub use user::{NewUser, User, UserInfo};
