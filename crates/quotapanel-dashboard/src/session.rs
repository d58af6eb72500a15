//! Session establishment

use quotapanel_client::{ApiClient, Result};
use quotapanel_core::Role;
use tracing::info;

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// Role the account holds
    pub role: Role,

    /// Bearer token returned by the backend
    pub token: String,
}

/// Log in and install the bearer token on the client.
///
/// The backend does not report the role at login; it is configured
/// alongside the credentials and passed through here.
///
/// # Errors
///
/// Returns an error if the login request fails or is rejected.
pub async fn establish(
    client: &mut ApiClient,
    role: Role,
    username: &str,
    password: &str,
) -> Result<Session> {
    let login = client.login(username, password).await?;
    client.set_token(login.access_token.clone());
    info!(%role, username, "session established");

    Ok(Session {
        role,
        token: login.access_token,
    })
}
