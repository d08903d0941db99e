//! Static file server for the generated site

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::Site;

/// Build the router: `/` is always the generated index, everything else is
/// looked up under `public_dir`.
pub fn router(public_dir: &Path) -> Router {
    let index = ServeFile::new(public_dir.join("index.html"));
    let files = ServeDir::new(public_dir).append_index_html_on_directories(true);

    Router::new()
        .route_service("/", index)
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

/// Serve the public directory until the process is stopped.
///
/// Fails if the address cannot be bound; there is no retry and no fallback
/// port.
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    if !site.public_dir.is_dir() {
        tracing::warn!(
            "{:?} does not exist, run `generate` first",
            site.public_dir
        );
    }

    let app = router(&site.public_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("Invalid address {}:{}", ip, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!(
        "Serving files from {} on http://{}:{}",
        site.public_dir.display(),
        ip,
        port
    );
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;

    Ok(())
}
