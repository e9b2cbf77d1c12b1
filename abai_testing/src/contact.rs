use std::net::IpAddr;

use abai_models::contact::{ContactForm, ContactSubmission};
use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

pub const CONTACT_ROUTE: &str = "/api/contact";

/// Submissions from addresses in this domain fail as if the email provider
/// was down.
pub const FAILING_DOMAIN: &str = "fail.example";

pub async fn start_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    info!("Starting contact endpoint testing server on {host}:{port}");
    info!("Contact endpoint: http://{host}:{port}{CONTACT_ROUTE}");
    info!("Submissions from @{FAILING_DOMAIN} fail with a delivery error");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router())
        .await
        .context("Failed to start HTTP server")
}

pub fn router() -> Router {
    Router::new().route(CONTACT_ROUTE, routing::post(contact))
}

async fn contact(Json(form): Json<ContactForm>) -> Response {
    match ContactSubmission::try_from(form) {
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": err.to_string(), "success": false})),
        )
            .into_response(),
        Ok(submission) if submission.email.0.domain() == FAILING_DOMAIN => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to send email", "success": false})),
        )
            .into_response(),
        Ok(_) => Json(json!({"message": "Email sent successfully", "success": true}))
            .into_response(),
    }
}
