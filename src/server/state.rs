//! Application state.
//!
//! Built once at startup and shared read-only by every handler. Nothing in
//! here changes after construction; per-request data lives in the contexts
//! the handlers build.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::render::{MaudRenderer, PageRenderer};
use crate::scan::Library;

/// State shared across all handlers.
pub struct AppState {
    /// Resolved site configuration.
    pub config: SiteConfig,
    /// Image library under the site directory.
    pub library: Library,
    /// Page renderer.
    pub renderer: Box<dyn PageRenderer>,
}

impl AppState {
    /// State with the default maud renderer.
    pub fn new(site_dir: impl Into<PathBuf>, config: SiteConfig) -> Self {
        let renderer = Box::new(MaudRenderer::new(&config));
        Self::with_renderer(site_dir, config, renderer)
    }

    pub fn with_renderer(
        site_dir: impl Into<PathBuf>,
        config: SiteConfig,
        renderer: Box<dyn PageRenderer>,
    ) -> Self {
        let library = Library::new(site_dir, config.content_root.clone());
        Self {
            config,
            library,
            renderer,
        }
    }

    pub fn site_dir(&self) -> &Path {
        self.library.site_dir()
    }

    /// Host to report in absolute URLs when a request carries no `Host`.
    pub(crate) fn fallback_host(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}
