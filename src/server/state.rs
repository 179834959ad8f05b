//! Application state shared across request handlers.

use std::sync::Arc;

use super::config::ServerConfig;
use super::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::error::{Error, Result};
use crate::transform::Rewriter;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Rewriter built from the configured rules.
    pub rewriter: Arc<Rewriter>,
    /// Upstream page source.
    pub fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("rules", self.rewriter.rules())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state from configuration, using an HTTP fetcher.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let rewriter = Rewriter::new(config.rules.clone())?;
        let fetcher = HttpFetcher::new(&config.fetch)
            .map_err(|e: FetchError| Error::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_fetcher(rewriter, Arc::new(fetcher)))
    }

    /// Build state around any fetcher.
    pub fn with_fetcher(rewriter: Rewriter, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            rewriter: Arc::new(rewriter),
            fetcher,
        }
    }
}
