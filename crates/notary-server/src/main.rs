//! notary-server: sign payloads into timestamped receipts over HTTPS.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use clap::Parser;
use notary::store::FileStore;
use notary::{signer_from_key_file, Notary, Signer};
use notary_server::{router, Cli};
use tracing::{debug, info};

/// Grace period for in-flight requests on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("notary_server=info,notary=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    let signer =
        signer_from_key_file(cli.signing_key.as_deref()).context("failed to load signing key")?;
    let mode = signer.mode();
    let store = FileStore::open(&cli.data_dir).context("failed to open receipt directory")?;
    debug!(data_dir = %cli.data_dir.display(), "opened receipt store");

    let app = router(Arc::new(Notary::new(signer, store)));

    let tls = RustlsConfig::from_pem_file(&cli.crt, &cli.key)
        .await
        .context("failed to load TLS certificate and key")?;
    let addr = cli
        .socket_addr()
        .with_context(|| format!("invalid listen address {:?}:{}", cli.addr, cli.port))?;

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    info!(%addr, ?mode, "starting notary server");
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("server failed")?;

    info!("server exited");
    Ok(())
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    }
}
