//! HTTP API Request Handlers

mod links;
mod matching;
mod system;

use std::sync::Arc;

use anyhow::{Context, Result};
use sagashi_core::{EpisodeParser, SlugMatcher, TitleMatcher};
use sagashi_links::{RedirectResolver, ShortLinkStore};
use url::Url;

use crate::config::{InputLimits, ServerConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub matcher: TitleMatcher,
    pub slugs: SlugMatcher,
    pub episodes: Arc<EpisodeParser>,
    pub links: Arc<ShortLinkStore>,
    pub resolver: Arc<RedirectResolver>,
    pub limits: InputLimits,
    /// Base for generated short links; the request `Host` is used when unset
    pub public_url: Option<Url>,
}

impl AppState {
    /// Builds the matchers, link store and resolver described by `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let policy = config.match_policy().context("Invalid match threshold")?;
        let episodes = EpisodeParser::new().context("Failed to build episode parser")?;
        let resolver =
            RedirectResolver::new(config.resolver_config()).context("Failed to build HTTP client")?;

        Ok(Self {
            matcher: TitleMatcher::new(policy),
            slugs: SlugMatcher::new(config.slug_policy()),
            episodes: Arc::new(episodes),
            links: Arc::new(ShortLinkStore::new(config.link_store_config())),
            resolver: Arc::new(resolver),
            limits: config.input_limits(),
            public_url: config.public_url.clone(),
        })
    }
}

// Re-export all handlers
pub use links::{redirect_short_link, resolve_redirects, shorten};
pub use matching::{episode, match_title, qualities, rank_titles, slug_match};
pub use system::health;
