use std::{net::SocketAddr, path::Path};

use abai_models::email_address::EmailAddressWithName;
use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Environment variable with additional config files, separated by `:`.
pub const CONFIG_PATHS_ENV: &str = "ABAI_CONFIG";
/// Prefix of environment variables overriding single config values, e.g.
/// `ABAI_EMAIL__MAILJET__API_SECRET`.
pub const ENV_PREFIX: &str = "ABAI";

/// Load the default config file, the files listed in `ABAI_CONFIG` and the
/// `ABAI_*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|x| !x.is_empty()))
        .collect::<Vec<_>>();
    load_paths(&paths)
}

/// Load the default and the development config files.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_paths(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH])
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Load the given config files, then apply the environment and finally each
/// override, which must be a TOML snippet like `"email.provider = \"smtp\""`.
pub fn load_with_override(paths: &[impl AsRef<Path>], overrides: &[&str]) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("http.allowed_origins")
                .try_parsing(true),
        );

    overrides
        .iter()
        .fold(builder, |builder, &x| {
            builder.add_source(File::from_str(x, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub site: SiteConfig,
    pub client: ClientConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub from: EmailAddressWithName,
    pub provider: EmailProvider,
    pub smtp: Option<SmtpConfig>,
    pub mailjet: Option<MailjetConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Mailjet,
    Smtp,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct MailjetConfig {
    pub api_key: String,
    pub api_secret: String,
    pub api_url_override: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub base_url: Url,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub background_color: String,
    pub theme_color: String,
    pub lang: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub contact_endpoint: Url,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}
