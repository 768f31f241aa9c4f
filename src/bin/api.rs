use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use approvals_site::{
    AppState, app,
    config::Config,
    enquiry::{Mailer, SmtpMailer},
    telemetry::init_tracing,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.admin_password_hash().is_none() {
        warn!("ADMIN_PASSWORD_HASH is not set; admin login and blog publishing are disabled");
    }

    let mailer: Arc<dyn Mailer> = Arc::new(
        SmtpMailer::new(config.smtp(), config.site_name()).context("Invalid SMTP settings")?,
    );
    let bind_addr = config.bind_addr().to_string();
    let state = AppState::new(config, mailer)
        .await
        .context("Failed to open the listing store")?;
    info!(posts = state.store.posts().await.len(), "site content loaded");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!(addr = %bind_addr, "listening");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for ctrl-c");
                return;
            }
            info!("shutdown requested");
            shutdown.cancel();
        }
    });

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.cancelled_owned())
    .await
    .context("Server error")?;

    info!("server stopped");
    Ok(())
}
