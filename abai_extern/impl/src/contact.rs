use std::sync::Arc;

use abai_di::Build;
use abai_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use abai_models::contact::ContactForm;
use abai_utils::trace_instrument;
use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    pub endpoint: Arc<Url>,
}

impl ContactApiService for ContactApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn submit(&self, form: ContactForm) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .http
            .post((*self.config.endpoint).clone())
            .json(&form)
            .send()
            .await
            .context("Failed to send contact request")?;

        let status = response.status().as_u16();

        response
            .json::<ContactResponse>()
            .await
            .map(|body| ContactApiResponse {
                status,
                success: body.success,
                message: body.message,
                error: body.error,
            })
            .context("Failed to deserialize contact response")
    }
}

#[derive(Deserialize)]
struct ContactResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    error: Option<String>,
}
