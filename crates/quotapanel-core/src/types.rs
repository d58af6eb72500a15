//! Wire types shared between the panel backend and the console

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier sentinel meaning "not assigned"
pub const IDENTIFIER_SENTINEL: &str = "0";

/// Operator role reported at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Panel administrator managing their own clients
    #[default]
    Admin,

    /// Super administrator managing admins, panels and the host
    Superadmin,
}

impl Role {
    /// Whether this role sees the admin/panel/system view
    #[must_use]
    pub const fn is_superadmin(self) -> bool {
        matches!(self, Self::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Superadmin => write!(f, "superadmin"),
        }
    }
}

/// Response envelope wrapping every JSON payload the backend returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseModel<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable message, present on most failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Payload, absent on failures and void operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,

    /// Token type, always `bearer`
    pub token_type: String,
}

/// A proxy client as reported by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Numeric row id assigned by the panel, if any
    #[serde(default)]
    pub id: Option<i64>,

    /// Client UUID; the sentinel `"0"` means unassigned
    #[serde(default)]
    pub uuid: Option<String>,

    /// Username (the panel stores email addresses here)
    pub username: String,

    /// Bytes consumed so far
    #[serde(default)]
    pub used_data: u64,

    /// Byte quota, `0` for unlimited
    #[serde(default)]
    pub data_limit: u64,

    /// Expiry as epoch milliseconds, `0` or absent for no expiry
    #[serde(default)]
    pub expiry_date_unix: Option<i64>,

    /// Whether the client is enabled
    #[serde(default)]
    pub status: bool,

    /// Whether the client currently has an open connection
    #[serde(default)]
    pub is_online: bool,

    /// Subscription path component
    #[serde(default)]
    pub sub_id: Option<String>,

    /// Protocol flow setting
    #[serde(default)]
    pub flow: Option<String>,
}

impl ClientRecord {
    /// Identifier to address this record in write operations
    #[must_use]
    pub fn write_identifier(&self) -> String {
        resolve_identifier(self.uuid.as_deref(), Some(&self.username), self.id)
    }

    /// Stable key for per-row view state
    #[must_use]
    pub fn row_key(&self) -> String {
        let head = self
            .uuid
            .as_deref()
            .filter(|uuid| !uuid.is_empty())
            .map_or_else(
                || self.id.map_or_else(String::new, |id| id.to_string()),
                str::to_string,
            );
        format!("{head}-{}", self.username)
    }
}

/// Resolve the identifier used to address a client in write operations.
///
/// Prefers the UUID when present and not the `"0"` sentinel, then the
/// username, then the numeric id, falling back to `"0"`.
#[must_use]
pub fn resolve_identifier(uuid: Option<&str>, username: Option<&str>, id: Option<i64>) -> String {
    if let Some(uuid) = uuid
        && !uuid.is_empty()
        && uuid != IDENTIFIER_SENTINEL
    {
        return uuid.to_string();
    }
    if let Some(username) = username
        && !username.is_empty()
    {
        return username.to_string();
    }
    id.map_or_else(|| IDENTIFIER_SENTINEL.to_string(), |id| id.to_string())
}

/// A panel administrator account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    /// Database id
    pub id: i64,

    /// Login name
    pub username: String,

    /// Whether the account is enabled
    #[serde(default)]
    pub is_active: bool,

    /// Remaining traffic in bytes
    #[serde(default)]
    pub traffic: i64,

    /// Panel this admin manages
    #[serde(default)]
    pub panel: Option<String>,

    /// Account expiry as epoch milliseconds
    #[serde(default)]
    pub expiry_date: Option<i64>,
}

/// A managed panel instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// Database id
    pub id: i64,

    /// Unique panel name
    pub name: String,

    /// Panel software flavor
    pub panel_type: String,

    /// Panel base URL
    pub url: String,

    /// Subscription base URL handed out to clients
    #[serde(default)]
    pub sub_url: Option<String>,

    /// Panel login username
    pub username: String,

    /// Whether the panel is enabled
    #[serde(default)]
    pub is_active: bool,
}

/// Host metrics reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Total memory in bytes
    #[serde(default)]
    pub total_memory: u64,

    /// Used memory in bytes
    #[serde(default)]
    pub used_memory: u64,

    /// Total disk space in bytes
    #[serde(default)]
    pub disk_total: u64,

    /// Used disk space in bytes
    #[serde(default)]
    pub disk_used: u64,

    /// CPU utilization percentage
    #[serde(default)]
    pub cpu_percent: f64,
}

/// Advertisement banner shown on the superadmin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdBanner {
    /// Banner title
    pub title: Option<String>,

    /// Banner body text
    pub text: Option<String>,

    /// Target link
    pub link: Option<String>,

    /// Button label
    pub button: Option<String>,
}

/// Dashboard snapshot; field presence depends on the caller's role
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    /// All admin accounts (superadmin only)
    pub admins: Option<Vec<AdminRecord>>,

    /// All managed panels (superadmin only)
    pub panels: Option<Vec<PanelRecord>>,

    /// Host metrics (superadmin only; patched in place by the poll)
    pub system: Option<SystemInfo>,

    /// Advertisement banner (superadmin only)
    pub ads: Option<AdBanner>,

    /// Clients belonging to the calling admin
    pub users: Option<Vec<ClientRecord>>,

    /// News messages published for admins
    pub news: Option<Vec<String>>,

    /// Subscription base URL of the admin's panel
    pub sub_url: Option<String>,

    /// Remaining traffic of the calling admin in bytes
    pub remaining_traffic: Option<i64>,

    /// Account expiry of the calling admin as epoch milliseconds
    pub expiry_time: Option<i64>,
}
