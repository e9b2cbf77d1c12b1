use std::future::Future;

use abai_models::contact::{ContactForm, ContactValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a submitted contact form and forward it to the contact inbox.
    ///
    /// The email provider is not contacted if validation fails.
    fn send_message(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Failed to send email")]
    Delivery(#[source] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        form: ContactForm,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
