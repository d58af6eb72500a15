//! Core types and utilities for the quotapanel console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod subscription;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use types::{ClientRecord, DashboardData, ResponseModel, Role, SystemInfo};

/// Initialize the logging system
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|e| Error::Configuration {
            message: e.to_string(),
        })
}
