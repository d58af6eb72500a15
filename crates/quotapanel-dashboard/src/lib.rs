//! Headless dashboard controller for the quotapanel console
//!
//! Holds the dashboard snapshot state machine, the background system-info
//! poll, derived user-list views and the create/edit form logic. Rendering
//! is someone else's job; everything here is observable state plus
//! operations that mutate it through the API client.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod controller;
pub mod form;
pub mod session;
pub mod view;

pub use controller::{DashboardController, SnapshotState};
pub use form::{FormError, UserForm};
pub use session::Session;
pub use view::{UserPage, UserQuery};
