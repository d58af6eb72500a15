//! Console entry point: configure, authenticate, run the controller

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use quotapanel_client::ApiClient;
use quotapanel_core::Config;
use quotapanel_dashboard::{DashboardController, SnapshotState, session};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("quotapanel: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    quotapanel_core::init_logging()?;

    info!(base_url = %config.api.base_url, role = %config.api.role, "starting");

    let mut client = ApiClient::new(config.api.base_url.clone());
    if let (Some(username), Some(password)) = (&config.api.username, &config.api.password) {
        session::establish(&mut client, config.api.role, username, password).await?;
    } else {
        warn!("no credentials configured, requests will be unauthenticated");
    }

    let controller = DashboardController::new(client, config.api.role, &config.dashboard);
    controller.load().await;

    match controller.state() {
        SnapshotState::Ready(data) => {
            info!(
                users = data.users.as_ref().map_or(0, Vec::len),
                admins = data.admins.as_ref().map_or(0, Vec::len),
                panels = data.panels.as_ref().map_or(0, Vec::len),
                "dashboard loaded"
            );
        }
        SnapshotState::Failed { message } => error!(%message, "dashboard failed to load"),
        SnapshotState::Loading => {}
    }

    controller.start_polling();
    info!("running, press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;

    controller.stop().await;
    info!("stopped");
    Ok(())
}
