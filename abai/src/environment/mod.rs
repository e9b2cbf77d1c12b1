use abai_api_rest::RestServerConfig;
use abai_config::Config;
use abai_core_contact_impl::ContactFeatureConfig;
use abai_core_site_impl::SiteFeatureConfig;
use abai_di::provider;
use abai_extern_impl::contact::ContactApiServiceConfig;
use anyhow::Context;
use axum::http::HeaderValue;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Extern
            ContactApiServiceConfig,

            // Core
            ContactFeatureConfig,
            SiteFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Extern
        contact_api_service_config: ContactApiServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        site_feature_config: SiteFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            allowed_origins: config
                .http
                .allowed_origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("Invalid allowed origin {origin:?}"))
                })
                .collect::<anyhow::Result<_>>()?,
        };

        // Extern
        let contact_api_service_config = ContactApiServiceConfig {
            endpoint: config.client.contact_endpoint.clone().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
        };

        let site = &config.site;
        let site_feature_config = SiteFeatureConfig {
            base_url: site.base_url.clone().into(),
            name: site.name.as_str().into(),
            short_name: site.short_name.as_str().into(),
            description: site.description.as_str().into(),
            background_color: site.background_color.as_str().into(),
            theme_color: site.theme_color.as_str().into(),
            lang: site.lang.as_str().into(),
            categories: site.categories.clone().into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Extern
            contact_api_service_config,

            // Core
            contact_feature_config,
            site_feature_config,
        })
    }

    /// Point the contact endpoint client somewhere else.
    pub fn with_contact_endpoint(mut self, endpoint: url::Url) -> Self {
        self.contact_api_service_config.endpoint = endpoint.into();
        self
    }
}
