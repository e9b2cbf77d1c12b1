use abai_client::{
    ContactFormController, Notification, NotificationLevel, Notifier, SubmitOutcome,
};
use abai_config::Config;
use abai_di::Provide;
use abai_models::contact::ContactField;
use anyhow::bail;
use clap::Args;
use url::Url;

use crate::environment::{types::ContactApi, ConfigProvider};

#[derive(Debug, Args)]
pub struct ContactCommand {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    /// Contact endpoint to submit to [default: client.contact_endpoint]
    #[arg(long)]
    endpoint: Option<Url>,
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut config_provider = ConfigProvider::new(&config)?;
        if let Some(endpoint) = self.endpoint {
            config_provider = config_provider.with_contact_endpoint(endpoint);
        }
        let api: ContactApi = config_provider.provide();

        let mut controller = ContactFormController::new(api, TerminalNotifier);
        for (field, value) in [
            (ContactField::FirstName, self.first_name),
            (ContactField::LastName, self.last_name),
            (ContactField::Email, self.email),
            (ContactField::Message, self.message),
        ] {
            controller.set_field(field, value);
        }

        match controller.submit().await {
            SubmitOutcome::Sent => Ok(()),
            SubmitOutcome::Invalid => {
                for error in controller.errors().iter() {
                    eprintln!("{error}");
                }
                bail!("Contact form is invalid")
            }
            SubmitOutcome::Rejected | SubmitOutcome::Unreachable => {
                bail!("Failed to submit contact form")
            }
        }
    }
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            level,
            title,
            description,
        } = notification;
        match level {
            NotificationLevel::Success => println!("{title}\n{description}"),
            NotificationLevel::Error => eprintln!("{title}\n{description}"),
        }
    }
}
