use std::sync::Arc;

use abai_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};

use super::error;
use crate::models::{contact::ApiContactForm, ApiResponse};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    form: Result<Json<ApiContactForm>, JsonRejection>,
) -> Response {
    let Ok(Json(form)) = form else {
        return error(StatusCode::BAD_REQUEST, "Invalid request body");
    };

    match service.send_message(form.into()).await {
        Ok(()) => Json(ApiResponse::message("Email sent successfully")).into_response(),
        Err(ContactSendMessageError::Validation(err)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(ContactSendMessageError::Delivery(err)) => {
            tracing::error!("Failed to send email: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
        }
    }
}
