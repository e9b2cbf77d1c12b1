use serde::Serialize;

pub mod contact;

/// Response body of the contact endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
            success: true,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
            success: false,
        }
    }
}
