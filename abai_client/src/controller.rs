use abai_extern_contracts::contact::ContactApiService;
use abai_models::contact::{ContactField, ContactForm, ContactFormErrors};
use tokio::sync::watch;
use tracing::{error, trace};

use crate::{Notification, Notifier};

const SENT_TITLE: &str = "Message sent successfully!";
const SENT_DESCRIPTION: &str = "Thank you for your interest. We'll get back to you soon.";
const REJECTED_TITLE: &str = "Failed to send message";
const REJECTED_DESCRIPTION: &str = "Please try again later.";
const UNREACHABLE_TITLE: &str = "Something went wrong";
const UNREACHABLE_DESCRIPTION: &str = "Please check your connection and try again.";

/// How a call to [`ContactFormController::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent.
    Invalid,
    Sent,
    /// The endpoint answered with an error.
    Rejected,
    /// No usable response was received.
    Unreachable,
}

/// State of a single contact form.
///
/// `submitting` is published through a [`watch`] channel so a view can
/// disable the submit control while a request is in flight.
#[derive(Debug)]
pub struct ContactFormController<Api, Notify> {
    api: Api,
    notifier: Notify,
    form: ContactForm,
    errors: ContactFormErrors,
    submitting: watch::Sender<bool>,
}

impl<Api, Notify> ContactFormController<Api, Notify>
where
    Api: ContactApiService,
    Notify: Notifier,
{
    pub fn new(api: Api, notifier: Notify) -> Self {
        Self {
            api,
            notifier,
            form: ContactForm::default(),
            errors: ContactFormErrors::default(),
            submitting: watch::Sender::new(false),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &ContactFormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Update a field. A field that currently shows an error is validated
    /// again so the error disappears as soon as the input is fixed.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value.into());
        if self.errors.get(field).is_some() {
            self.blur(field);
        }
    }

    /// Validate a single field, e.g. when it loses focus.
    pub fn blur(&mut self, field: ContactField) {
        let error = self.form.validate_field(field);
        self.errors.set(field, error);
    }

    /// Validate the form and, if valid, send it to the contact endpoint.
    ///
    /// Every outcome is reported through the notifier. The form is only
    /// cleared after the message has been sent.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(errors) = self.form.validate() {
            trace!(?errors, "contact form is invalid");
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }
        self.errors.clear();

        self.submitting.send_replace(true);
        let result = self.api.submit(self.form.clone()).await;
        self.submitting.send_replace(false);

        match result {
            Ok(response) if response.is_success() => {
                self.form = ContactForm::default();
                self.notifier
                    .notify(Notification::success(SENT_TITLE, SENT_DESCRIPTION));
                SubmitOutcome::Sent
            }
            Ok(response) => {
                self.notifier.notify(Notification::error(
                    REJECTED_TITLE,
                    response
                        .error
                        .unwrap_or_else(|| REJECTED_DESCRIPTION.into()),
                ));
                SubmitOutcome::Rejected
            }
            Err(err) => {
                error!("Failed to submit contact form: {err:#}");
                self.notifier.notify(Notification::error(
                    UNREACHABLE_TITLE,
                    UNREACHABLE_DESCRIPTION,
                ));
                SubmitOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use abai_extern_contracts::contact::{ContactApiResponse, MockContactApiService};
    use abai_models::contact::ContactValidationError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::notifier::MockNotifier;

    fn form() -> ContactForm {
        ContactForm {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            message: "Hello there, interested in the data center.".into(),
        }
    }

    fn fill<A: ContactApiService, N: Notifier>(sut: &mut ContactFormController<A, N>) {
        let form = form();
        for field in ContactField::ALL {
            sut.set_field(field, form.get(field));
        }
    }

    #[tokio::test]
    async fn submit_sent() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            form(),
            ContactApiResponse {
                status: 200,
                success: true,
                message: Some("Email sent successfully".into()),
                error: None,
            },
        );
        let notifier = MockNotifier::new()
            .with_notify(Notification::success(SENT_TITLE, SENT_DESCRIPTION));
        let mut sut = ContactFormController::new(api, notifier);
        fill(&mut sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Sent);
        assert_eq!(*sut.form(), ContactForm::default());
        assert!(sut.errors().is_empty());
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_invalid() {
        // Arrange
        let mut sut = ContactFormController::new(MockContactApiService::new(), MockNotifier::new());
        fill(&mut sut);
        sut.set_field(ContactField::Email, "john");
        sut.set_field(ContactField::Message, "Hi");

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Invalid);
        assert_eq!(
            sut.errors().iter().collect::<Vec<_>>(),
            [
                ContactValidationError::InvalidEmail,
                ContactValidationError::MessageTooShort
            ]
        );
        assert_eq!(sut.form().first_name, "John");
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_rejected_with_server_error() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            form(),
            ContactApiResponse {
                status: 500,
                success: false,
                message: None,
                error: Some("Failed to send email".into()),
            },
        );
        let notifier = MockNotifier::new()
            .with_notify(Notification::error(REJECTED_TITLE, "Failed to send email"));
        let mut sut = ContactFormController::new(api, notifier);
        fill(&mut sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Rejected);
        assert_eq!(*sut.form(), form());
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submit_rejected_without_error_message() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            form(),
            ContactApiResponse {
                status: 200,
                success: false,
                message: None,
                error: None,
            },
        );
        let notifier = MockNotifier::new()
            .with_notify(Notification::error(REJECTED_TITLE, REJECTED_DESCRIPTION));
        let mut sut = ContactFormController::new(api, notifier);
        fill(&mut sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Rejected);
        assert_eq!(*sut.form(), form());
    }

    #[tokio::test]
    async fn submit_unreachable() {
        // Arrange
        let api = MockContactApiService::new().with_submit_error(form());
        let notifier = MockNotifier::new().with_notify(Notification::error(
            UNREACHABLE_TITLE,
            UNREACHABLE_DESCRIPTION,
        ));
        let mut sut = ContactFormController::new(api, notifier);
        fill(&mut sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Unreachable);
        assert_eq!(*sut.form(), form());
        assert!(!sut.is_submitting());
    }

    #[tokio::test]
    async fn submitting_while_in_flight() {
        // Arrange
        let submitting = Arc::new(Mutex::new(None::<watch::Receiver<bool>>));

        let mut api = MockContactApiService::new();
        api.expect_submit().once().returning({
            let submitting = Arc::clone(&submitting);
            move |_| {
                let in_flight = submitting
                    .lock()
                    .unwrap()
                    .as_ref()
                    .is_some_and(|rx| *rx.borrow());
                Box::pin(std::future::ready(Ok(ContactApiResponse {
                    status: 200,
                    success: in_flight,
                    message: None,
                    error: None,
                })))
            }
        });
        let notifier = MockNotifier::new()
            .with_notify(Notification::success(SENT_TITLE, SENT_DESCRIPTION));

        let mut sut = ContactFormController::new(api, notifier);
        *submitting.lock().unwrap() = Some(sut.subscribe_submitting());
        fill(&mut sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Sent);
        assert!(!sut.is_submitting());
    }

    #[test]
    fn blur_and_fix_field() {
        let mut sut = ContactFormController::new(MockContactApiService::new(), MockNotifier::new());

        sut.set_field(ContactField::FirstName, "J");
        assert_eq!(sut.errors().get(ContactField::FirstName), None);

        sut.blur(ContactField::FirstName);
        assert_eq!(
            sut.errors().get(ContactField::FirstName),
            Some(ContactValidationError::FirstNameTooShort)
        );

        sut.set_field(ContactField::FirstName, "Jo");
        assert_eq!(sut.errors().get(ContactField::FirstName), None);
    }
}
