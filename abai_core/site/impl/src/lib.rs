use std::sync::Arc;

use abai_core_site_contracts::SiteFeatureService;
use abai_di::Build;
use abai_models::site::{
    ChangeFrequency, ManifestIcon, Robots, RobotsRule, Sitemap, SitemapEntry, WebManifest,
};
use abai_shared_contracts::time::TimeService;
use abai_utils::trace_instrument;
use url::Url;

const ICONS: &[(&str, &str, Option<&str>)] = &[
    ("/android-chrome-192x192.png", "192x192", Some("any")),
    ("/android-chrome-512x512.png", "512x512", Some("any")),
    ("/apple-touch-icon.png", "180x180", None),
    ("/favicon-32x32.png", "32x32", None),
    ("/favicon-16x16.png", "16x16", None),
];

#[derive(Debug, Clone, Build)]
pub struct SiteFeatureServiceImpl<Time> {
    time: Time,
    config: SiteFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct SiteFeatureConfig {
    pub base_url: Arc<Url>,
    pub name: Arc<str>,
    pub short_name: Arc<str>,
    pub description: Arc<str>,
    pub background_color: Arc<str>,
    pub theme_color: Arc<str>,
    pub lang: Arc<str>,
    pub categories: Arc<[String]>,
}

impl<Time> SiteFeatureService for SiteFeatureServiceImpl<Time>
where
    Time: TimeService,
{
    fn manifest(&self) -> WebManifest {
        let config = &self.config;
        WebManifest {
            name: config.name.to_string(),
            short_name: config.short_name.to_string(),
            description: config.description.to_string(),
            start_url: "/".into(),
            display: "standalone".into(),
            background_color: config.background_color.to_string(),
            theme_color: config.theme_color.to_string(),
            orientation: "portrait-primary".into(),
            scope: "/".into(),
            id: config.base_url.to_string(),
            categories: config.categories.to_vec(),
            lang: config.lang.to_string(),
            dir: "ltr".into(),
            icons: ICONS
                .iter()
                .map(|&(src, sizes, purpose)| ManifestIcon {
                    src: src.into(),
                    sizes: sizes.into(),
                    mime_type: "image/png".into(),
                    purpose: purpose.map(Into::into),
                })
                .collect(),
        }
    }

    fn robots(&self) -> Robots {
        Robots {
            rules: vec![RobotsRule {
                user_agent: "*".into(),
                allow: vec!["/".into()],
                disallow: Vec::new(),
            }],
            sitemap: self.config.base_url.join("sitemap.xml").ok(),
        }
    }

    #[trace_instrument(skip(self))]
    fn sitemap(&self) -> Sitemap {
        Sitemap {
            entries: vec![SitemapEntry {
                url: (*self.config.base_url).clone(),
                last_modified: self.time.now(),
                change_frequency: ChangeFrequency::Weekly,
                priority: 1.0,
            }],
        }
    }
}
