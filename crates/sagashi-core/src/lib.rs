//! # Sagashi Core
//!
//! Fuzzy title matching for anime catalogs. Provides a case-insensitive
//! Levenshtein similarity score, best-match selection under a configurable
//! acceptance threshold, URL slug ranking, and helpers for reading episode
//! numbers and stream qualities out of link labels.
//!
//! ## Quick Start
//!
//! ```rust
//! use sagashi_core::{MatchPolicy, TitleMatcher};
//!
//! let matcher = TitleMatcher::new(MatchPolicy::default());
//! let best = matcher
//!     .best_match("one pice", ["One Punch Man", "One Piece", "Bleach"])
//!     .unwrap();
//!
//! assert_eq!(best.label, "One Piece");
//! assert!(best.score > 0.8);
//! ```
pub mod error;
pub mod parser;
pub mod scoring;
pub mod types;

// Re-export primary API
pub use error::{Result, SagashiError};
pub use parser::EpisodeParser;
pub use scoring::{
    checked_query, edit_distance, similarity, MatchPolicy, SlugMatch, SlugMatcher, SlugPolicy,
    SlugRank, TitleMatcher,
};
pub use types::{
    find_episode, group_by_quality, Candidate, EpisodeLink, LabeledLink, Quality,
};
