use std::{net::SocketAddr, sync::Arc};

use abai_core_contact_contracts::ContactFeatureService;
use abai_core_site_contracts::SiteFeatureService;
use abai_di::Build;
use abai_utils::Apply;
use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Site> {
    config: RestServerConfig,
    contact: Contact,
    site: Site,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Origins allowed to call the API from a browser. CORS is disabled if
    /// empty.
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl<Contact, Site> RestServer<Contact, Site>
where
    Contact: ContactFeatureService,
    Site: SiteFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Starting REST API server on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let cors = (!self.config.allowed_origins.is_empty()).then(|| {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(self.config.allowed_origins.iter().cloned()))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        });

        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::site::router(self.site.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);

        router.apply_map(cors, Router::layer)
    }
}
