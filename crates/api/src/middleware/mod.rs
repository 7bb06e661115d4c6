//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. Request ID (add unique ID to each request and response)
//! 3. `TraceLayer` (request span with method, path and request id)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
