use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::types::{EpisodeLink, LabeledLink};

/// Reads episode numbers out of link text such as `"Episode 12"` or
/// `"EPISODE12 - The Return"`.
pub struct EpisodeParser {
    re_episode: Regex,
}

impl EpisodeParser {
    /// Constructs a new `EpisodeParser` with its pattern pre-compiled.
    ///
    /// # Errors
    ///
    /// Returns `SagashiError::RegexError` if the pattern fails to compile
    /// (should never happen with the static pattern defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_episode: Regex::new(r"(?i)episode\s*(\d+)")?,
        })
    }

    /// Returns the number following the first `Episode` marker in `text`.
    ///
    /// `None` when there is no marker or the digits do not fit in a `u32`.
    #[must_use]
    pub fn number(&self, text: &str) -> Option<u32> {
        self.re_episode
            .captures(text)
            .and_then(|c| c[1].parse().ok())
    }

    /// Keeps the links whose label names an episode, in input order.
    pub fn collect<'a, I>(&self, links: I) -> Vec<EpisodeLink>
    where
        I: IntoIterator<Item = &'a LabeledLink>,
    {
        let episodes: Vec<EpisodeLink> = links
            .into_iter()
            .filter_map(|link| {
                self.number(&link.label)
                    .map(|number| EpisodeLink::new(number, link.url.clone()))
            })
            .collect();

        debug!(count = episodes.len(), "collected episode links");
        episodes
    }
}
