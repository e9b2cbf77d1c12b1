use abai_config::Config;
use abai_email_contracts::{Email, EmailService};
use abai_models::email_address::EmailAddressWithName;
use anyhow::ensure;
use clap::Subcommand;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email through the configured backend
    Test { recipient: EmailAddressWithName },
    /// Check that the configured backend is reachable and accepts the credentials
    Ping,
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
            EmailCommand::Ping => ping(config).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            text_body: "Email deliverability seems to be working!".into(),
            html_body: Some("<p>Email deliverability seems to be working!</p>".into()),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");
    info!("Test email sent via {}", email_service.backend_name());

    Ok(())
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;
    email_service.ping().await?;
    println!("{} backend is reachable", email_service.backend_name());
    Ok(())
}
