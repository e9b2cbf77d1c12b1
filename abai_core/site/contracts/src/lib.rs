use abai_models::site::{Robots, Sitemap, WebManifest};

/// Static site metadata for browsers and crawlers.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SiteFeatureService: Send + Sync + 'static {
    fn manifest(&self) -> WebManifest;

    fn robots(&self) -> Robots;

    /// Sitemap listing the landing page, last modified now.
    fn sitemap(&self) -> Sitemap;
}

#[cfg(feature = "mock")]
impl MockSiteFeatureService {
    pub fn with_manifest(mut self, manifest: WebManifest) -> Self {
        self.expect_manifest().once().return_const(manifest);
        self
    }

    pub fn with_robots(mut self, robots: Robots) -> Self {
        self.expect_robots().once().return_const(robots);
        self
    }

    pub fn with_sitemap(mut self, sitemap: Sitemap) -> Self {
        self.expect_sitemap().once().return_const(sitemap);
        self
    }
}
