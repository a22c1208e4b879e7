use std::fmt;

use serde::{Deserialize, Serialize};

/// An episode page link with the episode number read from its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeLink {
    /// Episode number, e.g. `24`.
    pub number: u32,
    /// Link to the episode page.
    pub url: String,
}

impl EpisodeLink {
    /// Creates a new episode link.
    #[must_use]
    pub fn new(number: u32, url: impl Into<String>) -> Self {
        Self {
            number,
            url: url.into(),
        }
    }
}

impl fmt::Display for EpisodeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Episode {:02} <{}>", self.number, self.url)
    }
}

/// Returns the first link carrying episode `number`.
#[must_use]
pub fn find_episode(links: &[EpisodeLink], number: u32) -> Option<&EpisodeLink> {
    links.iter().find(|link| link.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_link_display() {
        let link = EpisodeLink::new(7, "https://site.example/ep/7");
        assert_eq!(link.to_string(), "Episode 07 <https://site.example/ep/7>");
    }

    #[test]
    fn find_episode_returns_first_hit() {
        let links = vec![
            EpisodeLink::new(1, "https://site.example/a"),
            EpisodeLink::new(2, "https://site.example/b"),
            EpisodeLink::new(2, "https://site.example/c"),
        ];

        assert_eq!(find_episode(&links, 2).map(|l| l.url.as_str()), Some("https://site.example/b"));
        assert!(find_episode(&links, 3).is_none());
        assert!(find_episode(&[], 1).is_none());
    }
}
