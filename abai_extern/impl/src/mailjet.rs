use std::{sync::Arc, time::Duration};

use abai_di::Build;
use abai_extern_contracts::mailjet::{MailjetApiService, MailjetContact, MailjetMessage};
use abai_utils::trace_instrument;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

/// https://dev.mailjet.com/email/reference/send-emails/
const API_URL: &str = "https://api.mailjet.com/";
const SEND_PATH: &str = "v3.1/send";
const APIKEY_PATH: &str = "v3/REST/apikey";

#[derive(Debug, Clone, Build)]
pub struct MailjetApiServiceImpl {
    config: MailjetApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MailjetApiServiceConfig {
    api_url: Arc<Url>,
    api_key: Arc<str>,
    api_secret: Arc<str>,
    timeout: Duration,
}

impl MailjetApiServiceConfig {
    pub fn new(
        api_key: &str,
        api_secret: &str,
        timeout: Duration,
        api_url_override: Option<Url>,
    ) -> Self {
        Self {
            api_url: api_url_override
                .unwrap_or_else(|| API_URL.parse().unwrap())
                .into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout,
        }
    }
}

impl MailjetApiServiceImpl {
    pub fn new(config: MailjetApiServiceConfig) -> Self {
        Self {
            config,
            http: Default::default(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> anyhow::Result<reqwest::RequestBuilder> {
        let url = self
            .config
            .api_url
            .join(path)
            .with_context(|| format!("Failed to build mailjet {path} URL"))?;

        Ok(self
            .http
            .request(method, url)
            .basic_auth(&*self.config.api_key, Some(&*self.config.api_secret))
            .timeout(self.config.timeout))
    }
}

impl MailjetApiService for MailjetApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, message: MailjetMessage) -> anyhow::Result<bool> {
        let request = SendRequest {
            messages: [(&message).into()],
        };

        let response = self
            .request(reqwest::Method::POST, SEND_PATH)?
            .json(&request)
            .send()
            .await
            .context("Failed to send mailjet send request")?
            .error_for_status()
            .context("Mailjet send request returned an error")?
            .json::<SendResponse>()
            .await
            .context("Failed to deserialize mailjet send response")?;

        Ok(!response.messages.is_empty()
            && response
                .messages
                .iter()
                .all(|message| message.status == "success"))
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.request(reqwest::Method::GET, APIKEY_PATH)?
            .send()
            .await
            .context("Failed to send mailjet apikey request")?
            .error_for_status()
            .context("Mailjet apikey request returned an error")?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: [SendMessage<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessage<'a> {
    from: Contact<'a>,
    to: Vec<Contact<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Contact<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    html_part: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a MailjetMessage> for SendMessage<'a> {
    fn from(value: &'a MailjetMessage) -> Self {
        Self {
            from: (&value.from).into(),
            to: value.to.iter().map(Into::into).collect(),
            reply_to: value.reply_to.as_ref().map(Into::into),
            subject: &value.subject,
            text_part: &value.text_part,
            html_part: value.html_part.as_deref(),
        }
    }
}

impl<'a> From<&'a MailjetContact> for Contact<'a> {
    fn from(value: &'a MailjetContact) -> Self {
        Self {
            email: &value.email,
            name: value.name.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponse {
    messages: Vec<SendResponseMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponseMessage {
    status: String,
}
