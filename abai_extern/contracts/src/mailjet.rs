use std::future::Future;

/// Mailjet Send API v3.1
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailjetApiService: Send + Sync + 'static {
    /// Send a single message.
    ///
    /// Returns whether Mailjet reported the message as accepted.
    fn send(&self, message: MailjetMessage) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Verify the configured credentials.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailjetMessage {
    pub from: MailjetContact,
    pub to: Vec<MailjetContact>,
    pub reply_to: Option<MailjetContact>,
    pub subject: String,
    pub text_part: String,
    pub html_part: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailjetContact {
    pub email: String,
    pub name: Option<String>,
}

#[cfg(feature = "mock")]
impl MockMailjetApiService {
    pub fn with_send(mut self, message: MailjetMessage, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_ping(mut self) -> Self {
        self.expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
