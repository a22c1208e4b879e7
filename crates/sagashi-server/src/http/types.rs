//! HTTP API Request/Response Types

use std::collections::BTreeMap;

use sagashi_core::{Candidate, LabeledLink, SlugRank};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/match`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub query: String,
    pub candidates: Vec<String>,
    /// Overrides the server threshold for this request
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Accepted best title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub title: String,
    pub score: f64,
}

/// Body of `POST /api/rank`
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub query: String,
    pub candidates: Vec<String>,
}

/// Every candidate, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub query: String,
    pub candidates: Vec<Candidate>,
}

/// Body of `POST /api/slug-match`
#[derive(Debug, Clone, Deserialize)]
pub struct SlugMatchRequest {
    pub query: String,
    pub links: Vec<String>,
}

/// Best catalog URL for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugMatchResponse {
    pub best_match: String,
    pub slug: String,
    pub rank: SlugRank,
}

/// Body of `POST /api/episode`
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeRequest {
    pub links: Vec<LabeledLink>,
    pub episode: u32,
}

/// Body of `POST /api/qualities`
#[derive(Debug, Clone, Deserialize)]
pub struct QualitiesRequest {
    pub links: Vec<LabeledLink>,
}

/// Quality label → link
pub type QualitiesResponse = BTreeMap<String, String>;

/// Query string of `GET /q`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortenParams {
    pub q: Option<String>,
}

/// A freshly minted short link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url: String,
}

/// Query string of `GET /resolve`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveParams {
    pub url: Option<String>,
}

/// Final media URL of a redirect chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub resolved_url: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
