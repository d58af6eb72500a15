//! Dashboard view-state controller
//!
//! Owns the snapshot state machine (`Loading -> Ready | Failed`), the
//! background system-info poll for superadmins, per-row expansion state and
//! the fire-and-refetch mutations. All shared state sits behind
//! `parking_lot` locks so a rendering layer can read it from any thread.

use crate::view::{self, UserPage, UserQuery};
use parking_lot::{Mutex, RwLock};
use quotapanel_client::{ApiClient, Result, user::UserWrite};
use quotapanel_core::config::DashboardConfig;
use quotapanel_core::{ClientRecord, DashboardData, Role, subscription, units};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

/// Snapshot lifecycle
#[derive(Debug, Clone)]
pub enum SnapshotState {
    /// Initial fetch (or a refetch) is in flight
    Loading,

    /// A snapshot is held and current
    Ready(DashboardData),

    /// The last fetch failed
    Failed {
        /// Error shown to the operator
        message: String,
    },
}

impl SnapshotState {
    /// Whether a snapshot is held
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Headless controller behind the dashboard screen
#[derive(Debug)]
pub struct DashboardController {
    client: ApiClient,
    role: Role,
    page_size: usize,
    poll_interval: Duration,
    state: Arc<RwLock<SnapshotState>>,
    query: RwLock<UserQuery>,
    expanded: RwLock<HashSet<String>>,
    shutdown_tx: broadcast::Sender<()>,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardController {
    /// Create a controller for the given role.
    ///
    /// The role is passed in explicitly; the controller never consults any
    /// ambient session state.
    #[must_use]
    pub fn new(client: ApiClient, role: Role, config: &DashboardConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            client,
            role,
            page_size: config.page_size,
            poll_interval: Duration::from_secs(config.system_poll_secs),
            state: Arc::new(RwLock::new(SnapshotState::Loading)),
            query: RwLock::new(UserQuery::default()),
            expanded: RwLock::new(HashSet::new()),
            shutdown_tx,
            poll_handle: Mutex::new(None),
        }
    }

    /// Override the poll interval, mainly for fast test loops
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Role this controller was built for
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Current snapshot state
    #[must_use]
    pub fn state(&self) -> SnapshotState {
        self.state.read().clone()
    }

    /// Fetch the dashboard snapshot, replacing the held state.
    ///
    /// For superadmins a secondary system-info fetch is merged in; its
    /// failure is logged and does not affect the primary state.
    pub async fn load(&self) {
        *self.state.write() = SnapshotState::Loading;

        match self.client.fetch_dashboard().await {
            Ok(mut data) => {
                if self.role.is_superadmin() {
                    match self.client.fetch_system_info().await {
                        Ok(info) => data.system = Some(info),
                        Err(error) => {
                            warn!(%error, "system info fetch failed, keeping snapshot without it");
                        }
                    }
                }
                *self.state.write() = SnapshotState::Ready(data);
            }
            Err(error) => {
                error!(%error, "dashboard fetch failed");
                *self.state.write() = SnapshotState::Failed {
                    message: error.to_string(),
                };
            }
        }
    }

    /// Start the background system-info poll.
    ///
    /// Only superadmins poll; for admins this is a no-op. A failed tick
    /// logs a warning, changes nothing and never stops the timer. Each tick
    /// patches only the `system` field of the held snapshot.
    pub fn start_polling(&self) {
        if !self.role.is_superadmin() {
            return;
        }

        let mut handle_slot = self.poll_handle.lock();
        if handle_slot.is_some() {
            return;
        }

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let period = self.poll_interval;

        *handle_slot = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick completes immediately; consume it so the poll
            // starts one full period after startup.
            ticker.tick().await;

            info!(period_secs = period.as_secs_f64(), "system info poll started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match client.fetch_system_info().await {
                            Ok(info) => {
                                let mut state = state.write();
                                if let SnapshotState::Ready(data) = &mut *state {
                                    data.system = Some(info);
                                }
                            }
                            Err(error) => warn!(%error, "system info poll tick failed"),
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("system info poll stopping");
                        break;
                    }
                }
            }
        }));
    }

    /// Stop the background poll and wait for it to exit
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(());
        let handle = self.poll_handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Set the search text, resetting to the first page
    pub fn set_search(&self, search: impl Into<String>) {
        let mut query = self.query.write();
        query.search = search.into();
        query.page = 1;
    }

    /// Jump to a page; values below 1 are clamped to 1
    pub fn set_page(&self, page: usize) {
        self.query.write().page = page.max(1);
    }

    /// Current search and page inputs
    #[must_use]
    pub fn query(&self) -> UserQuery {
        self.query.read().clone()
    }

    /// Derived user page, `None` unless a snapshot is held
    #[must_use]
    pub fn user_page(&self) -> Option<UserPage> {
        let state = self.state.read();
        let SnapshotState::Ready(data) = &*state else {
            return None;
        };
        let users = data.users.as_deref().unwrap_or(&[]);
        let query = self.query.read().clone();
        Some(view::select_page(users, &query, self.page_size))
    }

    /// Toggle a row's expanded state, keyed by [`ClientRecord::row_key`]
    pub fn toggle_expanded(&self, row_key: &str) {
        let mut expanded = self.expanded.write();
        if !expanded.remove(row_key) {
            expanded.insert(row_key.to_string());
        }
    }

    /// Whether a row is expanded
    #[must_use]
    pub fn is_expanded(&self, row_key: &str) -> bool {
        self.expanded.read().contains(row_key)
    }

    /// Subscription URL for a user, derived from the snapshot's base URL
    #[must_use]
    pub fn subscription_url(&self, user: &ClientRecord) -> Option<String> {
        let state = self.state.read();
        let SnapshotState::Ready(data) = &*state else {
            return None;
        };
        let base = data.sub_url.as_deref()?;
        let sub_id = user.sub_id.as_deref()?;
        let url = subscription::build_sub_url(base, sub_id);
        (!url.is_empty()).then_some(url)
    }

    /// Delete a user, then refetch the snapshot once.
    ///
    /// # Errors
    ///
    /// Returns the API error without refetching when the delete fails.
    pub async fn delete_user(&self, user: &ClientRecord) -> Result<()> {
        self.client.delete_user(&user.write_identifier()).await?;
        info!(username = %user.username, "user deleted");
        self.load().await;
        Ok(())
    }

    /// Reset a user's usage counter, then refetch the snapshot once.
    ///
    /// # Errors
    ///
    /// Returns the API error without refetching when the reset fails.
    pub async fn reset_usage(&self, user: &ClientRecord) -> Result<()> {
        self.client.reset_user_usage(&user.username).await?;
        info!(username = %user.username, "usage reset");
        self.load().await;
        Ok(())
    }

    /// Flip a user's enabled flag, then refetch the snapshot once.
    ///
    /// The backend has no partial-update endpoint for this, so the complete
    /// record is re-submitted with the flag inverted. Whatever the server
    /// holds at that moment is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the API error without refetching when the update fails.
    pub async fn toggle_status(&self, user: &ClientRecord) -> Result<()> {
        let form = UserWrite {
            email: user.username.clone(),
            total_gb: units::bytes_to_gb(user.data_limit),
            expiry_date: user
                .expiry_date_unix
                .filter(|ms| *ms > 0)
                .and_then(units::date_from_ms),
            enable: !user.status,
            sub_id: user.sub_id.clone(),
            flow: user.flow.clone().unwrap_or_default(),
        };

        self.client
            .update_user(&user.write_identifier(), &form)
            .await?;
        info!(username = %user.username, enabled = !user.status, "user status toggled");
        self.load().await;
        Ok(())
    }
}
