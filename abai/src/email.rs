use abai_config::{EmailConfig, EmailProvider};
use abai_email_impl::EmailServiceImpl;
use abai_extern_impl::mailjet::{MailjetApiServiceConfig, MailjetApiServiceImpl};
use anyhow::Context;

use crate::environment::types::Email;

/// Set up the configured email backend
pub fn connect(config: &EmailConfig) -> anyhow::Result<Email> {
    let from = config.from.clone();

    match config.provider {
        EmailProvider::Mailjet => {
            let mailjet = config
                .mailjet
                .as_ref()
                .context("Missing [email.mailjet] config")?;
            let api = MailjetApiServiceImpl::new(MailjetApiServiceConfig::new(
                &mailjet.api_key,
                &mailjet.api_secret,
                mailjet.timeout.into(),
                mailjet.api_url_override.clone(),
            ));
            Ok(EmailServiceImpl::mailjet(from, api))
        }
        EmailProvider::Smtp => {
            let smtp = config
                .smtp
                .as_ref()
                .context("Missing [email.smtp] config")?;
            EmailServiceImpl::smtp(from, &smtp.url).context("Failed to set up SMTP transport")
        }
    }
}
