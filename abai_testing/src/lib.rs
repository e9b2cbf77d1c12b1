//! Fake implementations of the HTTP APIs this project talks to, for tests
//! and local development.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

pub mod contact;
pub mod mailjet;

/// Bind `router` to an ephemeral port on localhost and serve it in the
/// background. Returns the bound address.
pub async fn spawn(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(addr)
}
