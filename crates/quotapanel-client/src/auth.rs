//! Authentication endpoint

use crate::{ApiClient, Error, Result};
use quotapanel_core::types::LoginResponse;
use reqwest::Method;
use tracing::debug;

impl ApiClient {
    /// Log in with username and password.
    ///
    /// The backend expects a URL-encoded form rather than JSON for this one
    /// endpoint. The returned token is not stored automatically; call
    /// [`ApiClient::set_token`] with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let form = [("username", username), ("password", password)];
        let request = self.request(Method::POST, "/login").form(&form);

        let envelope = self
            .send_envelope::<LoginResponse>(request, "Login failed")
            .await?;

        debug!(username, "login succeeded");
        envelope.data.ok_or_else(|| Error::missing_data("login"))
    }
}
