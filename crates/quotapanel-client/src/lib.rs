//! HTTP API client for the quotapanel backend
//!
//! Wraps the backend's `{success, message, data}` response envelope and
//! exposes one module per API surface: authentication, the dashboard
//! snapshot, admin accounts, panels, superadmin host operations and client
//! (user) management.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod admin;
pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod panel;
pub mod superadmin;
pub mod user;

pub use api::ApiClient;
pub use error::{Error, Result};
