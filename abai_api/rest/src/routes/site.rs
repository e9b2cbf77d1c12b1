use std::sync::Arc;

use abai_core_site_contracts::SiteFeatureService;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing, Json, Router,
};

pub fn router(service: Arc<impl SiteFeatureService>) -> Router<()> {
    Router::new()
        .route("/manifest.webmanifest", routing::get(manifest))
        .route("/robots.txt", routing::get(robots))
        .route("/sitemap.xml", routing::get(sitemap))
        .with_state(service)
}

async fn manifest(service: State<Arc<impl SiteFeatureService>>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        Json(service.manifest()),
    )
        .into_response()
}

async fn robots(service: State<Arc<impl SiteFeatureService>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        service.robots().to_string(),
    )
        .into_response()
}

async fn sitemap(service: State<Arc<impl SiteFeatureService>>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        service.sitemap().to_string(),
    )
        .into_response()
}
