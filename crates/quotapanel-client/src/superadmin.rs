//! Superadmin host operations: backup, restore and log retrieval

use crate::{ApiClient, Result};
use reqwest::{Method, multipart};
use tracing::info;

impl ApiClient {
    /// Download a database backup as raw bytes.
    ///
    /// This endpoint streams the backup file directly and bypasses the
    /// response envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn download_backup(&self) -> Result<Vec<u8>> {
        let bytes = self
            .get_bytes("/superadmin/backup", "Failed to download backup")
            .await?;
        info!(size = bytes.len(), "backup downloaded");
        Ok(bytes)
    }

    /// Upload a backup file and restore the database from it.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn restore_backup(&self, file_name: &str, contents: Vec<u8>) -> Result<String> {
        let part = multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let request = self
            .request(Method::POST, "/superadmin/restore")
            .multipart(form);

        let envelope = self
            .send_envelope::<serde_json::Value>(request, "Failed to restore backup")
            .await?;

        Ok(envelope
            .message
            .unwrap_or_else(|| "Database restored successfully".to_string()))
    }

    /// Fetch recent backend log lines
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn fetch_logs(&self) -> Result<Vec<String>> {
        Ok(self
            .get_json("/superadmin/logs", "Failed to fetch logs")
            .await?
            .unwrap_or_default())
    }
}
