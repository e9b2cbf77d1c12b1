use abai_email_contracts::{Email, EmailService};
use abai_extern_contracts::mailjet::{MailjetApiService, MailjetContact, MailjetMessage};
use abai_models::email_address::EmailAddressWithName;
use abai_utils::{trace_instrument, Apply};
use anyhow::{anyhow, Context};
use lettre::{
    message::{MessageBuilder, MultiPart, SinglePart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Sends emails from a fixed sender address through either the Mailjet API
/// or an SMTP relay.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl<MailjetApi> {
    from: EmailAddressWithName,
    backend: EmailBackend<MailjetApi>,
}

#[derive(Debug, Clone)]
enum EmailBackend<MailjetApi> {
    Mailjet(MailjetApi),
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
}

impl<MailjetApi> EmailServiceImpl<MailjetApi> {
    pub fn mailjet(from: EmailAddressWithName, api: MailjetApi) -> Self {
        Self {
            from,
            backend: EmailBackend::Mailjet(api),
        }
    }

    pub fn smtp(from: EmailAddressWithName, url: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .build();

        Ok(Self {
            from,
            backend: EmailBackend::Smtp(transport),
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            EmailBackend::Mailjet(_) => "mailjet",
            EmailBackend::Smtp(_) => "smtp",
        }
    }
}

impl<MailjetApi> EmailService for EmailServiceImpl<MailjetApi>
where
    MailjetApi: MailjetApiService,
{
    #[trace_instrument(skip(self))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        match &self.backend {
            EmailBackend::Mailjet(api) => api.send(mailjet_message(&self.from, email)).await,
            EmailBackend::Smtp(transport) => {
                let message = smtp_message(&self.from, email)?;
                transport
                    .send(message)
                    .await
                    .map(|response| response.is_positive())
                    .map_err(Into::into)
            }
        }
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            EmailBackend::Mailjet(api) => api.ping().await,
            EmailBackend::Smtp(transport) => transport
                .test_connection()
                .await?
                .then_some(())
                .ok_or_else(|| anyhow!("Failed to ping smtp server")),
        }
    }
}

fn mailjet_message(from: &EmailAddressWithName, email: Email) -> MailjetMessage {
    MailjetMessage {
        from: mailjet_contact(from),
        to: vec![mailjet_contact(&email.recipient)],
        reply_to: email.reply_to.as_ref().map(mailjet_contact),
        subject: email.subject,
        text_part: email.text_body,
        html_part: email.html_body,
    }
}

fn mailjet_contact(address: &EmailAddressWithName) -> MailjetContact {
    MailjetContact {
        email: address.email().into(),
        name: address.name().map(Into::into),
    }
}

fn smtp_message(from: &EmailAddressWithName, email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(from.0.clone())
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.html_body {
        Some(html_body) => builder.multipart(MultiPart::alternative_plain_html(
            email.text_body,
            html_body,
        )),
        None => builder.singlepart(SinglePart::plain(email.text_body)),
    };

    message.context("Failed to build email message")
}

#[cfg(test)]
mod tests {
    use abai_extern_contracts::mailjet::MockMailjetApiService;
    use pretty_assertions::assert_eq;

    use super::*;

    fn from() -> EmailAddressWithName {
        "Contact Form <noreply@ab-ai.ca>".parse().unwrap()
    }

    fn email() -> Email {
        Email {
            recipient: "Alberta AI <info@ab-ai.ca>".parse().unwrap(),
            subject: "New contact from John Doe".into(),
            text_body: "Hello".into(),
            html_body: Some("<p>Hello</p>".into()),
            reply_to: Some("John Doe <john@example.com>".parse().unwrap()),
        }
    }

    fn expected_message() -> MailjetMessage {
        MailjetMessage {
            from: MailjetContact {
                email: "noreply@ab-ai.ca".into(),
                name: Some("Contact Form".into()),
            },
            to: vec![MailjetContact {
                email: "info@ab-ai.ca".into(),
                name: Some("Alberta AI".into()),
            }],
            reply_to: Some(MailjetContact {
                email: "john@example.com".into(),
                name: Some("John Doe".into()),
            }),
            subject: "New contact from John Doe".into(),
            text_part: "Hello".into(),
            html_part: Some("<p>Hello</p>".into()),
        }
    }

    #[tokio::test]
    async fn mailjet_send_ok() {
        // Arrange
        let api = MockMailjetApiService::new().with_send(expected_message(), true);
        let sut = EmailServiceImpl::mailjet(from(), api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn mailjet_send_rejected() {
        // Arrange
        let api = MockMailjetApiService::new().with_send(expected_message(), false);
        let sut = EmailServiceImpl::mailjet(from(), api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn mailjet_ping() {
        let sut = EmailServiceImpl::mailjet(from(), MockMailjetApiService::new().with_ping());
        sut.ping().await.unwrap();
    }

    #[test]
    fn smtp_message_is_multipart() {
        let message = smtp_message(&from(), email()).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("<noreply@ab-ai.ca>"));
        assert!(formatted.contains("<info@ab-ai.ca>"));
        assert!(formatted.contains("Reply-To:"));
        assert!(formatted.contains("<john@example.com>"));
        assert!(formatted.contains("Subject: New contact from John Doe"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("<p>Hello</p>"));
    }

    #[test]
    fn smtp_message_plain() {
        let email = Email {
            html_body: None,
            reply_to: None,
            ..email()
        };

        let message = smtp_message(&from(), email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(!formatted.contains("multipart"));
        assert!(!formatted.contains("Reply-To"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[test]
    fn smtp_invalid_url() {
        let result = EmailServiceImpl::<MockMailjetApiService>::smtp(from(), "http://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn backend_name() {
        let sut = EmailServiceImpl::mailjet(from(), MockMailjetApiService::new());
        assert_eq!(sut.backend_name(), "mailjet");
    }
}
