//! Panel management endpoints (superadmin only)

use crate::{ApiClient, Error, Result};
use quotapanel_core::types::PanelRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Fields an operator fills in when creating or updating a panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelWrite {
    /// Panel software flavor
    pub panel_type: String,

    /// Unique panel name
    pub name: String,

    /// Panel base URL
    pub url: String,

    /// Subscription base URL handed out to clients
    pub sub_url: Option<String>,

    /// Panel login username
    pub username: String,

    /// Panel login password
    pub password: String,

    /// Whether the panel is enabled
    pub is_active: bool,
}

impl ApiClient {
    /// Create a new panel
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn create_panel(&self, form: &PanelWrite) -> Result<PanelRecord> {
        self.post_json("/superadmin/panel", form, "Failed to create panel")
            .await?
            .ok_or_else(|| Error::missing_data("create panel"))
    }

    /// Update an existing panel
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn update_panel(&self, panel_id: i64, form: &PanelWrite) -> Result<PanelRecord> {
        self.put_json(
            &format!("/superadmin/panel/{panel_id}"),
            form,
            "Failed to update panel",
        )
        .await?
        .ok_or_else(|| Error::missing_data("update panel"))
    }

    /// Delete a panel
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn delete_panel(&self, panel_id: i64) -> Result<()> {
        self.delete(
            &format!("/superadmin/panel/{panel_id}"),
            "Failed to delete panel",
        )
        .await
    }

    /// Flip a panel's enabled flag
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn toggle_panel_status(&self, panel_id: i64) -> Result<PanelRecord> {
        self.patch_empty(
            &format!("/superadmin/panel/{panel_id}/status"),
            "Failed to toggle panel status",
        )
        .await?
        .ok_or_else(|| Error::missing_data("toggle panel status"))
    }

    /// List inbound tags grouped by protocol for a panel.
    ///
    /// An absent payload yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    pub async fn panel_inbounds(
        &self,
        panel_name: &str,
    ) -> Result<HashMap<String, Vec<String>>> {
        let path = format!(
            "/superadmin/panel/{}/inbounds",
            Self::encode_segment(panel_name)
        );
        Ok(self
            .get_json(&path, "Failed to fetch panel inbounds")
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_form() -> PanelWrite {
        PanelWrite {
            panel_type: "3x-ui".to_string(),
            name: "eu-1".to_string(),
            url: "https://eu1.example.com".to_string(),
            sub_url: Some("https://sub.eu1.example.com".to_string()),
            username: "root".to_string(),
            password: "hunter2".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_panel_sends_form_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/superadmin/panel"))
            .and(body_json(json!({
                "panel_type": "3x-ui",
                "name": "eu-1",
                "url": "https://eu1.example.com",
                "sub_url": "https://sub.eu1.example.com",
                "username": "root",
                "password": "hunter2",
                "is_active": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 2, "name": "eu-1", "panel_type": "3x-ui",
                         "url": "https://eu1.example.com", "username": "root", "is_active": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let panel = client.create_panel(&sample_form()).await.unwrap();
        assert_eq!(panel.id, 2);
        assert_eq!(panel.name, "eu-1");
    }

    #[tokio::test]
    async fn test_panel_inbounds_returns_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/superadmin/panel/eu-1/inbounds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"vless": ["in-1", "in-2"], "trojan": ["in-3"]}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let inbounds = client.panel_inbounds("eu-1").await.unwrap();

        assert_eq!(inbounds.get("vless").map(Vec::len), Some(2));
        assert_eq!(inbounds.get("trojan").map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_panel_inbounds_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/superadmin/panel/eu-1/inbounds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let inbounds = client.panel_inbounds("eu-1").await.unwrap();
        assert!(inbounds.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_panel_status_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/superadmin/panel/2/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let error = client.toggle_panel_status(2).await.unwrap_err();
        assert_eq!(error.to_string(), "Failed to toggle panel status");
    }
}
