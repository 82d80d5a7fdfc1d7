use anyhow::{Context, Result};
use do_ddns::error::Error;
use do_ddns::{Config, DigitalOceanProvider, DynProvider, Shared};
use is_terminal::IsTerminal;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when the HTTP API listener address can't be resolved or bound.
const EXIT_BIND_FAILED: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_init();

    let config: Shared = Arc::new(Config::from_env()?);
    tracing::debug!("loaded config {config:?}");

    let provider: DynProvider = Arc::new(DigitalOceanProvider::from_config(&config)?);
    let account = provider
        .get_account()
        .await
        .context("DigitalOcean account check failed")?;
    tracing::info!("running with account {:?}", account.email);

    let server = match do_ddns::api::new(config.clone(), provider) {
        Ok(server) => server,
        Err(err @ (Error::Bind { .. } | Error::BindAddr { .. })) => {
            tracing::error!("listen failed: {err}");
            std::process::exit(EXIT_BIND_FAILED);
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("listening at http://{}", server.local_addr());
    server.with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "do_ddns=info,tower_http=info".into()),
        )
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("quitting from signal");
}
