use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const SEND_ROUTE: &str = "/v3.1/send";
pub const APIKEY_ROUTE: &str = "/v3/REST/apikey";
pub const MESSAGES_ROUTE: &str = "/_testing/messages";

/// Messages to recipients in this domain are answered with status `error`.
pub const REJECTED_DOMAIN: &str = "rejected.example";

pub async fn start_server(
    host: IpAddr,
    port: u16,
    api_key: String,
    api_secret: String,
) -> anyhow::Result<()> {
    info!("Starting mailjet testing server on {host}:{port}");
    info!("API url: http://{host}:{port}/");
    info!("Received messages: http://{host}:{port}{MESSAGES_ROUTE}");
    info!("API key: {api_key:?}");
    info!("API secret: {api_secret:?}");
    info!("Messages to recipients @{REJECTED_DOMAIN} are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(api_key, api_secret))
        .await
        .context("Failed to start HTTP server")
}

pub fn router(api_key: String, api_secret: String) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .route(APIKEY_ROUTE, routing::get(apikey))
        .route(MESSAGES_ROUTE, routing::get(messages))
        .with_state(Arc::new(StateInner {
            api_key,
            api_secret,
            messages: Default::default(),
        }))
}

type State = axum::extract::State<Arc<StateInner>>;
struct StateInner {
    api_key: String,
    api_secret: String,
    messages: RwLock<Vec<Message>>,
}

impl StateInner {
    fn is_authorized(&self, auth: Option<&Authorization<Basic>>) -> bool {
        auth.is_some_and(|auth| {
            auth.username() == self.api_key && auth.password() == self.api_secret
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub from: Contact,
    pub to: Vec<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Contact>,
    pub subject: String,
    pub text_part: String,
    #[serde(rename = "HTMLPart", default, skip_serializing_if = "Option::is_none")]
    pub html_part: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

async fn send(
    state: State,
    auth: Option<TypedHeader<Authorization<Basic>>>,
    Json(request): Json<SendRequest>,
) -> Response {
    if !state.is_authorized(auth.as_ref().map(|x| &x.0)) {
        return unauthorized();
    }

    if request.messages.is_empty() || request.messages.iter().any(|x| x.to.is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ErrorMessage": "Each message needs at least one recipient"})),
        )
            .into_response();
    }

    let results = request
        .messages
        .iter()
        .map(|message| {
            let rejected = message
                .to
                .iter()
                .any(|to| to.email.ends_with(&format!("@{REJECTED_DOMAIN}")));
            json!({
                "Status": if rejected { "error" } else { "success" },
                "To": message.to.iter().map(|to| json!({
                    "Email": to.email,
                    "MessageUUID": Uuid::new_v4(),
                })).collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>();

    state.messages.write().await.extend(request.messages);

    Json(json!({ "Messages": results })).into_response()
}

async fn apikey(state: State, auth: Option<TypedHeader<Authorization<Basic>>>) -> Response {
    if !state.is_authorized(auth.as_ref().map(|x| &x.0)) {
        return unauthorized();
    }

    Json(json!({
        "Count": 1,
        "Data": [{ "APIKey": state.api_key, "IsActive": true }],
        "Total": 1,
    }))
    .into_response()
}

async fn messages(state: State) -> Json<Vec<Message>> {
    Json(state.messages.read().await.clone())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"ErrorMessage": "API key authentication/authorization failure"})),
    )
        .into_response()
}
