//! # Slug Ranking
//!
//! Ranks catalog URLs by how their last path segment relates to a query,
//! e.g. `https://site.example/anime/one-piece/` against `"One Piece"`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::scoring::policy::SlugPolicy;

/// How a URL slug relates to the query slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugRank {
    /// The query slug does not occur in the slug.
    Unrelated,
    /// The query slug occurs somewhere inside the slug.
    Contains,
    /// The slug starts with the query slug.
    Prefix,
    /// The slug equals the query slug.
    Exact,
}

impl SlugRank {
    /// Classifies `slug` against `query_slug`.
    #[must_use]
    pub fn classify(slug: &str, query_slug: &str) -> Self {
        if query_slug.is_empty() {
            Self::Unrelated
        } else if slug == query_slug {
            Self::Exact
        } else if slug.starts_with(query_slug) {
            Self::Prefix
        } else if slug.contains(query_slug) {
            Self::Contains
        } else {
            Self::Unrelated
        }
    }
}

impl fmt::Display for SlugRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrelated => write!(f, "unrelated"),
            Self::Contains => write!(f, "contains"),
            Self::Prefix => write!(f, "prefix"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// A ranked catalog URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugMatch {
    /// Catalog URL without its query string.
    pub url: String,
    /// Lowercased last path segment.
    pub slug: String,
    pub rank: SlugRank,
}

/// Turns a free-form query into slug form: `" One  Piece "` → `"one-piece"`.
#[must_use]
pub fn query_slug(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns the lowercased last non-empty path segment of `url`.
#[must_use]
pub fn slug_of(url: &Url) -> Option<String> {
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_lowercase)
}

/// Ranks catalog URLs against a query under a [`SlugPolicy`].
#[derive(Debug, Clone, Default)]
pub struct SlugMatcher {
    policy: SlugPolicy,
}

impl SlugMatcher {
    /// Create a slug matcher with the given policy.
    pub fn new(policy: SlugPolicy) -> Self {
        Self { policy }
    }

    /// Get the slug policy.
    pub fn policy(&self) -> &SlugPolicy {
        &self.policy
    }

    /// Ranks every usable URL, best first.
    ///
    /// Query strings and fragments are dropped, then URLs that fail to parse,
    /// have no slug, repeat an earlier URL, or carry an excluded marker are
    /// skipped. Order is rank descending, then shorter slug, then input order.
    pub fn rank<I, S>(&self, query: &str, links: I) -> Vec<SlugMatch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted = query_slug(query);
        let mut seen = HashSet::new();
        let mut ranked = Vec::new();

        for link in links {
            let link = link.as_ref().trim();
            let mut url = match Url::parse(link) {
                Ok(url) => url,
                Err(e) => {
                    warn!(link, error = %e, "skipping unparseable link");
                    continue;
                }
            };
            url.set_query(None);
            url.set_fragment(None);

            let Some(slug) = slug_of(&url) else {
                continue;
            };
            if self.policy.excludes(&slug) {
                continue;
            }
            if !seen.insert(url.as_str().to_string()) {
                continue;
            }

            let rank = SlugRank::classify(&slug, &wanted);
            ranked.push(SlugMatch {
                url: url.into(),
                slug,
                rank,
            });
        }

        ranked.sort_by(|a, b| {
            b.rank
                .cmp(&a.rank)
                .then_with(|| a.slug.chars().count().cmp(&b.slug.chars().count()))
        });

        debug!(query = %wanted, kept = ranked.len(), "ranked catalog slugs");
        ranked
    }

    /// Returns the top-ranked URL whose slug relates to the query.
    pub fn best_match<I, S>(&self, query: &str, links: I) -> Option<SlugMatch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rank(query, links)
            .into_iter()
            .find(|m| m.rank > SlugRank::Unrelated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &[&str] = &[
        "https://site.example/anime/naruto-shippuden/",
        "https://site.example/anime/boruto-naruto-next-generations/",
        "https://site.example/anime/naruto/?ref=search",
        "https://site.example/anime/naruto-movie-1/",
        "https://site.example/anime/naruto/",
    ];

    #[test]
    fn query_slug_normalization() {
        assert_eq!(query_slug("  One   Piece "), "one-piece");
        assert_eq!(query_slug("Naruto"), "naruto");
        assert_eq!(query_slug("   "), "");
    }

    #[test]
    fn slug_of_takes_last_segment() {
        let url = Url::parse("https://site.example/anime/One-Piece/").unwrap();
        assert_eq!(slug_of(&url).as_deref(), Some("one-piece"));

        let root = Url::parse("https://site.example/").unwrap();
        assert_eq!(slug_of(&root), None);
    }

    #[test]
    fn classify_ranks() {
        assert_eq!(SlugRank::classify("naruto", "naruto"), SlugRank::Exact);
        assert_eq!(SlugRank::classify("naruto-shippuden", "naruto"), SlugRank::Prefix);
        assert_eq!(SlugRank::classify("boruto-naruto-next", "naruto"), SlugRank::Contains);
        assert_eq!(SlugRank::classify("bleach", "naruto"), SlugRank::Unrelated);
        assert_eq!(SlugRank::classify("bleach", ""), SlugRank::Unrelated);
    }

    #[test]
    fn rank_filters_dedupes_and_orders() {
        let ranked = SlugMatcher::default().rank("Naruto", CATALOG);
        let slugs: Vec<&str> = ranked.iter().map(|m| m.slug.as_str()).collect();

        assert_eq!(
            slugs,
            vec!["naruto", "naruto-shippuden", "boruto-naruto-next-generations"]
        );
        assert_eq!(ranked[0].url, "https://site.example/anime/naruto/");
        assert_eq!(ranked[0].rank, SlugRank::Exact);
    }

    #[test]
    fn shorter_slug_wins_within_rank() {
        let links = [
            "https://site.example/anime/one-piece-film-red-special/",
            "https://site.example/anime/one-piece-fan-letter/",
        ];
        let best = SlugMatcher::default().best_match("one piece", links).unwrap();
        assert_eq!(best.slug, "one-piece-fan-letter");
        assert_eq!(best.rank, SlugRank::Prefix);
    }

    #[test]
    fn no_related_slug_is_none() {
        let links = ["https://site.example/anime/bleach/", "not a url"];
        assert!(SlugMatcher::default().best_match("naruto", links).is_none());
    }

    #[test]
    fn excluded_markers_are_configurable() {
        let links = ["https://site.example/anime/naruto-movie-1/"];

        assert!(SlugMatcher::default().best_match("naruto", links).is_none());

        let keep_movies =
            SlugMatcher::new(SlugPolicy::new().with_excluded_markers(Vec::<String>::new()));
        let best = keep_movies.best_match("naruto", links).unwrap();
        assert_eq!(best.rank, SlugRank::Prefix);
    }

    #[test]
    fn slug_rank_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SlugRank::Exact).unwrap(), "\"exact\"");
        assert_eq!(SlugRank::Contains.to_string(), "contains");
    }
}
