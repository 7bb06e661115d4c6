//! ProShop client.
//!
//! A single-store state container in the Redux mould: views dispatch
//! [`Action`]s through async action creators, pure reducers compute the next
//! [`AppState`], and views render from that state.
//!
//! ```text
//! view effect ─▶ thunk ─▶ Request ─▶ store ─▶ reducers ─▶ state ─▶ render
//!                  │                   ▲
//!                  └── HTTP ──▶ Success / Fail
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod api;
pub mod cart;
pub mod config;
pub mod reducers;
pub mod resource;
pub mod storage;
pub mod store;
pub mod views;

pub use actions::Action;
pub use api::{ApiError, HttpProductApi, ProductApi};
pub use config::ClientConfig;
pub use reducers::AppState;
pub use resource::{RequestState, Resource, ResourceAction, Ticket};
pub use storage::{LocalStorage, StorageError};
pub use store::Store;
