//! Client (user) management endpoints

use crate::{ApiClient, Error, Result};
use chrono::NaiveDate;
use quotapanel_core::types::ClientRecord;
use quotapanel_core::{subscription, units};
use serde::Serialize;
use uuid::Uuid;

/// Fields an operator fills in when creating or updating a client.
///
/// The traffic quota is authored in gigabytes and the expiry as a calendar
/// date; both are converted at the wire boundary. A `None` expiry serializes
/// as the sentinel `0`, never as null.
#[derive(Debug, Clone)]
pub struct UserWrite {
    /// Username (email address)
    pub email: String,

    /// Traffic quota in gigabytes
    pub total_gb: f64,

    /// Expiry date, `None` for no expiry
    pub expiry_date: Option<NaiveDate>,

    /// Whether the client is enabled (ignored on create, always `true`)
    pub enable: bool,

    /// Subscription id; generated on create when `None`
    pub sub_id: Option<String>,

    /// Protocol flow setting
    pub flow: String,
}

#[derive(Serialize)]
struct ClientPayload<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    enable: bool,
    expiry_time: i64,
    total: u64,
    sub_id: String,
    flow: &'a str,
}

fn expiry_time(date: Option<NaiveDate>) -> i64 {
    date.map_or(0, units::expiry_ms_from_date)
}

impl ApiClient {
    /// Create a new client.
    ///
    /// A fresh v4 UUID and a random subscription id are generated on the
    /// client side; the backend stores both verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn create_user(&self, form: &UserWrite) -> Result<ClientRecord> {
        let payload = ClientPayload {
            email: &form.email,
            id: Some(Uuid::new_v4().to_string()),
            enable: true,
            expiry_time: expiry_time(form.expiry_date),
            total: units::gb_to_bytes(form.total_gb),
            sub_id: form.sub_id.as_deref().map_or_else(
                subscription::generate_sub_id,
                subscription::sanitize_sub_id,
            ),
            flow: &form.flow,
        };

        self.post_json("/admin/user", &payload, "Failed to create user")
            .await?
            .ok_or_else(|| Error::missing_data("create user"))
    }

    /// Update an existing client addressed by its resolved identifier.
    ///
    /// See [`quotapanel_core::types::resolve_identifier`] for the fallback
    /// chain. The UUID is never re-sent on update.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn update_user(&self, identifier: &str, form: &UserWrite) -> Result<ClientRecord> {
        let payload = ClientPayload {
            email: &form.email,
            id: None,
            enable: form.enable,
            expiry_time: expiry_time(form.expiry_date),
            total: units::gb_to_bytes(form.total_gb),
            sub_id: form
                .sub_id
                .as_deref()
                .map_or_else(String::new, subscription::sanitize_sub_id),
            flow: &form.flow,
        };

        let path = format!("/admin/user/{}", Self::encode_segment(identifier));
        self.put_json(&path, &payload, "Failed to update user")
            .await?
            .ok_or_else(|| Error::missing_data("update user"))
    }

    /// Delete a client addressed by its resolved identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn delete_user(&self, identifier: &str) -> Result<()> {
        let path = format!("/admin/user/{}", Self::encode_segment(identifier));
        self.delete(&path, "Failed to delete user").await
    }

    /// Flip a client's enabled flag through the dedicated endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn toggle_user_status(&self, identifier: &str) -> Result<ClientRecord> {
        let path = format!("/admin/user/{}/status", Self::encode_segment(identifier));
        self.patch_empty(&path, "Failed to toggle user status")
            .await?
            .ok_or_else(|| Error::missing_data("toggle user status"))
    }

    /// Reset a client's traffic usage counter.
    ///
    /// The backend addresses this endpoint by username only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn reset_user_usage(&self, username: &str) -> Result<()> {
        let path = format!("/admin/user/{}/reset", Self::encode_segment(username));
        self.put_empty(&path, "Failed to reset user usage").await
    }
}
