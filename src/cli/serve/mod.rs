//! Serve command - runs the gate in front of the provisioning backend

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::create_router_with_state;
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::observability::{create_metrics_router, init_metrics};

/// Arguments for the serve command
///
/// Every flag is optional; an unset flag leaves the configured value alone.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Provisioning backend host and port
    #[arg(long = "provision-host", visible_alias = "provisionHost", env = "PROVISION_HOST")]
    pub provision_host: Option<String>,

    /// Provisioning backend scheme
    #[arg(long = "provision-scheme", visible_alias = "provisionScheme", env = "PROVISION_SCHEME")]
    pub provision_scheme: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Secret used to verify bearer tokens
    #[arg(long = "token-secret", env = "TOKEN_KEY", hide_env_values = true)]
    pub token_secret: Option<String>,
}

impl ServeArgs {
    /// Overlay the flags that were given on top of `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.provision_host {
            config.provision.host = host.clone();
        }
        if let Some(scheme) = &self.provision_scheme {
            config.provision.scheme = scheme.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(secret) = &self.token_secret {
            config.token.secret = secret.clone();
        }
    }
}

/// Run the gate
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load().unwrap_or_default();
    args.apply(&mut config);

    init_logging(&config.logging);

    let cache = crate::create_credential_cache(&config);
    let sweeper = cache.spawn_sweeper();

    let state = crate::create_app_state_with_config(&config, cache)?;
    let metrics = init_metrics(&config.metrics);

    let mut app = create_router_with_state(state);
    if let Some(m) = metrics {
        app = app.merge(create_metrics_router(m, &config.metrics.path));
    }

    let addr = build_socket_addr(&config)?;
    info!("Starting provision gate on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Provision gate shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
