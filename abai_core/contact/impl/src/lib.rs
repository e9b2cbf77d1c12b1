use std::sync::Arc;

use abai_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use abai_di::Build;
use abai_email_contracts::{Email, EmailService};
use abai_models::{
    contact::{ContactForm, ContactSubmission},
    email_address::EmailAddressWithName,
};
use abai_utils::trace_instrument;
use anyhow::anyhow;
use tracing::{error, info};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub recipient: Arc<EmailAddressWithName>,
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    #[trace_instrument(skip(self))]
    async fn send_message(&self, form: ContactForm) -> Result<(), ContactSendMessageError> {
        let submission = ContactSubmission::try_from(form)?;
        let email = compose_email(&submission, (*self.config.recipient).clone());

        match self.email.send(email).await {
            Ok(true) => {
                info!(from = %submission.email, "contact message sent");
                Ok(())
            }
            Ok(false) => {
                error!(from = %submission.email, "email provider did not accept the contact message");
                Err(ContactSendMessageError::Delivery(anyhow!(
                    "Email provider did not accept the message"
                )))
            }
            Err(err) => {
                error!(from = %submission.email, "Failed to send contact message: {err:#}");
                Err(ContactSendMessageError::Delivery(err))
            }
        }
    }
}

fn compose_email(submission: &ContactSubmission, recipient: EmailAddressWithName) -> Email {
    let name = submission.full_name();
    let email = submission.email.as_str();
    let message = &**submission.message;

    let text_body = format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}");
    let html_body = format!(
        "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p><p><strong>Message:</strong></p><p>{}</p>",
        htmlescape::encode_minimal(&name),
        htmlescape::encode_minimal(email),
        line_breaks(&htmlescape::encode_minimal(message)),
    );

    Email {
        recipient,
        subject: format!("New contact from {name}"),
        text_body,
        html_body: Some(html_body),
        reply_to: Some(submission.email.clone().with_name(name)),
    }
}

fn line_breaks(s: &str) -> String {
    s.replace("\r\n", "<br>").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use abai_email_contracts::MockEmailService;
    use abai_models::contact::ContactValidationError;
    use abai_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: Arc::new("Alberta AI <info@ab-ai.ca>".parse().unwrap()),
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            message: "Hello there, interested in the data center.".into(),
        }
    }

    fn expected_email() -> Email {
        Email {
            recipient: "Alberta AI <info@ab-ai.ca>".parse().unwrap(),
            subject: "New contact from John Doe".into(),
            text_body: "Name: John Doe\nEmail: john@example.com\n\nMessage:\nHello there, interested in the data center.".into(),
            html_body: Some(
                "<p><strong>Name:</strong> John Doe</p><p><strong>Email:</strong> john@example.com</p><p><strong>Message:</strong></p><p>Hello there, interested in the data center.</p>".into(),
            ),
            reply_to: Some("John Doe <john@example.com>".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new().with_send(expected_email(), true);
        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn missing_field() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            config: config(),
        };

        // Act
        let result = sut
            .send_message(ContactForm {
                last_name: " ".into(),
                ..form()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Validation(
                ContactValidationError::Missing
            ))
        );
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            config: config(),
        };

        // Act
        let result = sut
            .send_message(ContactForm {
                email: "not-an-email".into(),
                ..form()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Validation(
                ContactValidationError::InvalidEmail
            ))
        );
    }

    #[tokio::test]
    async fn not_accepted() {
        // Arrange
        let email = MockEmailService::new().with_send(expected_email(), false);
        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(_)));
    }

    #[tokio::test]
    async fn provider_error() {
        // Arrange
        let email =
            MockEmailService::new().with_send_error(expected_email(), "connection refused");
        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(err)) if err.to_string() == "connection refused");
    }

    #[test]
    fn html_body_escapes_and_breaks_lines() {
        let submission = ContactSubmission::try_from(ContactForm {
            first_name: "<b>John</b>".into(),
            message: "Line one & more\r\nLine two\nLine <three>".into(),
            ..form()
        })
        .unwrap();

        let email = compose_email(&submission, (*config().recipient).clone());

        assert_eq!(email.subject, "New contact from <b>John</b> Doe");
        assert_eq!(
            email.text_body,
            "Name: <b>John</b> Doe\nEmail: john@example.com\n\nMessage:\nLine one & more\r\nLine two\nLine <three>"
        );
        assert_eq!(
            email.html_body.unwrap(),
            "<p><strong>Name:</strong> &lt;b&gt;John&lt;/b&gt; Doe</p><p><strong>Email:</strong> john@example.com</p><p><strong>Message:</strong></p><p>Line one &amp; more<br>Line two<br>Line &lt;three&gt;</p>"
        );
    }
}
