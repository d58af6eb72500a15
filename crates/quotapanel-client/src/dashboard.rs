//! Dashboard snapshot and system info endpoints

use crate::{ApiClient, Error, Result};
use quotapanel_core::{DashboardData, SystemInfo};

impl ApiClient {
    /// Fetch the role-shaped dashboard snapshot.
    ///
    /// A successful envelope with no payload yields an empty snapshot
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn fetch_dashboard(&self) -> Result<DashboardData> {
        Ok(self
            .get_json::<DashboardData>("/dashboard/", "Failed to fetch dashboard data")
            .await?
            .unwrap_or_default())
    }

    /// Fetch current host metrics (superadmin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend reports failure,
    /// or the payload is absent.
    pub async fn fetch_system_info(&self) -> Result<SystemInfo> {
        self.get_json("/superadmin/system", "Failed to fetch system info")
            .await?
            .ok_or_else(|| Error::missing_data("system info"))
    }
}
