//! mozaiku-server binary: parse flags, wire up the store, serve.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mozaiku_server::{AppState, DEFAULT_ALLOWED_ORIGIN, ImageStore, app};

/// Pixelation endpoint for the mozaiku upload form.
///
/// Accepts multipart image uploads on `/api/pixelate` and serves the
/// pixelated results under `/images`.
#[derive(Parser)]
#[command(name = "mozaiku-server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Directory holding per-request image artifacts.
    #[arg(long, default_value = "public/images")]
    storage_dir: PathBuf,

    /// Origin allowed on `/api` routes.
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mozaiku_server=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let origin = HeaderValue::from_str(&args.allowed_origin)
        .with_context(|| format!("invalid allowed origin {:?}", args.allowed_origin))?;

    tokio::fs::create_dir_all(&args.storage_dir)
        .await
        .with_context(|| format!("creating storage dir {:?}", args.storage_dir))?;

    let state = AppState::new(ImageStore::new(&args.storage_dir));
    let router = app(state, origin);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(
        bind = %args.bind,
        storage_dir = %args.storage_dir.display(),
        allowed_origin = %args.allowed_origin,
        "listening"
    );

    axum::serve(listener, router)
        .await
        .context("server exited")?;
    Ok(())
}
