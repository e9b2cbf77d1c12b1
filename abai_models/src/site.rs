use std::fmt::{self, Display, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use url::Url;

/// Web app manifest as served at `/manifest.webmanifest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub orientation: String,
    pub scope: String,
    pub id: String,
    pub categories: Vec<String>,
    pub lang: String,
    pub dir: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Crawler directives, rendered in the `robots.txt` format by [`Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robots {
    pub rules: Vec<RobotsRule>,
    pub sitemap: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

/// Sitemap, rendered as sitemaps.org XML by [`Display`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: Url,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl Display for Robots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "User-Agent: {}", rule.user_agent)?;
            for path in &rule.allow {
                writeln!(f, "Allow: {path}")?;
            }
            for path in &rule.disallow {
                writeln!(f, "Disallow: {path}")?;
            }
            f.write_char('\n')?;
        }
        if let Some(sitemap) = &self.sitemap {
            writeln!(f, "Sitemap: {sitemap}")?;
        }
        Ok(())
    }
}

impl Display for Sitemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#
        )?;
        for entry in &self.entries {
            writeln!(f, "<url>")?;
            writeln!(
                f,
                "<loc>{}</loc>",
                htmlescape::encode_minimal(entry.url.as_str())
            )?;
            writeln!(
                f,
                "<lastmod>{}</lastmod>",
                entry
                    .last_modified
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
            )?;
            writeln!(
                f,
                "<changefreq>{}</changefreq>",
                entry.change_frequency.as_str()
            )?;
            writeln!(f, "<priority>{}</priority>", entry.priority)?;
            writeln!(f, "</url>")?;
        }
        write!(f, "</urlset>")
    }
}
