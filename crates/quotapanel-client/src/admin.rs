//! Admin account management endpoints (superadmin only)

use crate::{ApiClient, Error, Result};
use quotapanel_core::types::AdminRecord;
use quotapanel_core::units;
use serde::Serialize;

/// Fields an operator fills in when creating or updating an admin.
///
/// The traffic quota is authored in gigabytes and converted to bytes at the
/// wire boundary.
#[derive(Debug, Clone)]
pub struct AdminWrite {
    /// Login name
    pub username: String,

    /// Login password
    pub password: String,

    /// Whether the account is enabled
    pub is_active: bool,

    /// Panel this admin manages
    pub panel: String,

    /// Traffic quota in gigabytes
    pub traffic_gb: f64,

    /// Whether deleted clients return their traffic to the admin
    pub return_traffic: bool,

    /// Account expiry as epoch milliseconds
    pub expiry_date: Option<i64>,
}

#[derive(Serialize)]
struct AdminPayload<'a> {
    username: &'a str,
    password: &'a str,
    is_active: bool,
    panel: &'a str,
    traffic: u64,
    return_traffic: bool,
    expiry_date: Option<i64>,
}

impl AdminWrite {
    fn payload(&self) -> AdminPayload<'_> {
        AdminPayload {
            username: &self.username,
            password: &self.password,
            is_active: self.is_active,
            panel: &self.panel,
            traffic: units::gb_to_bytes(self.traffic_gb),
            return_traffic: self.return_traffic,
            expiry_date: self.expiry_date,
        }
    }
}

impl ApiClient {
    /// Create a new admin account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn create_admin(&self, form: &AdminWrite) -> Result<AdminRecord> {
        self.post_json("/superadmin/admin", &form.payload(), "Failed to create admin")
            .await?
            .ok_or_else(|| Error::missing_data("create admin"))
    }

    /// Update an existing admin account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn update_admin(&self, admin_id: i64, form: &AdminWrite) -> Result<AdminRecord> {
        self.put_json(
            &format!("/superadmin/admin/{admin_id}"),
            &form.payload(),
            "Failed to update admin",
        )
        .await?
        .ok_or_else(|| Error::missing_data("update admin"))
    }

    /// Delete an admin account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn delete_admin(&self, admin_id: i64) -> Result<()> {
        self.delete(
            &format!("/superadmin/admin/{admin_id}"),
            "Failed to delete admin",
        )
        .await
    }

    /// Flip an admin account's enabled flag
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn toggle_admin_status(&self, admin_id: i64) -> Result<AdminRecord> {
        self.patch_empty(
            &format!("/superadmin/admin/{admin_id}/status"),
            "Failed to toggle admin status",
        )
        .await?
        .ok_or_else(|| Error::missing_data("toggle admin status"))
    }
}
