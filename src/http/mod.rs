//! HTTP boundary.
//!
//! # Data Flow
//! ```text
//! request
//!     → server.rs (Axum router, middleware, shared state)
//!     → api.rs  (REST: JSON in/out)      ─┐
//!     → form.rs (HTML: form in, redirect) ┼→ auth gate (writes only)
//!                                         └→ resolver → store
//!     → error.rs (failure → status code)
//! ```

pub mod api;
pub mod error;
pub mod form;
pub mod server;

pub use server::{AppState, HttpServer};
