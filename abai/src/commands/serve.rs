use abai_config::Config;
use abai_di::Provide;
use abai_email_contracts::EmailService;
use tracing::info;

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    info!("Checking {} email backend", email.backend_name());
    email.ping().await?;

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    server.serve().await
}
