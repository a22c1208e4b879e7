//! Title, slug, episode and quality matching handlers

use axum::{extract::State, http::StatusCode, Json};
use sagashi_core::{
    checked_query, find_episode, group_by_quality, EpisodeLink, MatchPolicy, TitleMatcher,
};
use tracing::debug;

use super::AppState;
use crate::config::InputLimits;
use crate::http::error::{ApiError, ApiResult};
use crate::http::extract::ApiJson;
use crate::http::types::*;

fn too_large(message: String) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "INPUT_TOO_LARGE", message)
}

/// Rejects a query or title list that would make scoring expensive.
///
/// Edit distance is quadratic in title length, so both the count and the
/// length of every title are bounded.
fn check_titles(limits: &InputLimits, query: &str, titles: &[String]) -> ApiResult<()> {
    if titles.len() > limits.max_candidates {
        return Err(too_large(format!(
            "{} candidates exceeds the limit of {}",
            titles.len(),
            limits.max_candidates
        )));
    }
    let longest = std::iter::once(query)
        .chain(titles.iter().map(String::as_str))
        .map(|title| title.chars().count())
        .max()
        .unwrap_or_default();
    if longest > limits.max_title_chars {
        return Err(too_large(format!(
            "title of {longest} chars exceeds the limit of {}",
            limits.max_title_chars
        )));
    }
    Ok(())
}

/// Best title for a query, or `404 NO_MATCH` when nothing clears the threshold
pub async fn match_title(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let query = checked_query(&request.query)?.to_string();
    check_titles(&state.limits, &query, &request.candidates)?;
    let matcher = match request.threshold {
        Some(threshold) => TitleMatcher::new(MatchPolicy::try_with_threshold(threshold)?),
        None => state.matcher.clone(),
    };
    let threshold = matcher.policy().threshold;

    debug!(query = %query, candidates = request.candidates.len(), "match request");

    let candidates = request.candidates;
    let scored_query = query.clone();
    let best = tokio::task::spawn_blocking(move || matcher.best_match(&scored_query, &candidates))
        .await?
        .ok_or_else(|| {
            ApiError::not_found(
                "NO_MATCH",
                format!("no title scored above {threshold} for {query:?}"),
            )
        })?;

    Ok(Json(MatchResponse {
        title: best.label,
        score: best.score,
    }))
}

/// Every candidate with its score, best first
pub async fn rank_titles(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RankRequest>,
) -> ApiResult<Json<RankResponse>> {
    let query = checked_query(&request.query)?.to_string();
    check_titles(&state.limits, &query, &request.candidates)?;

    let matcher = state.matcher.clone();
    let candidates = request.candidates;
    let (query, candidates) = tokio::task::spawn_blocking(move || {
        let ranked = matcher.rank(&query, &candidates);
        (query, ranked)
    })
    .await?;

    Ok(Json(RankResponse { query, candidates }))
}

/// Best catalog URL by slug
pub async fn slug_match(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SlugMatchRequest>,
) -> ApiResult<Json<SlugMatchResponse>> {
    let query = checked_query(&request.query)?;
    if request.links.len() > state.limits.max_candidates {
        return Err(too_large(format!(
            "{} links exceeds the limit of {}",
            request.links.len(),
            state.limits.max_candidates
        )));
    }
    let best = state
        .slugs
        .best_match(query, &request.links)
        .ok_or_else(|| ApiError::not_found("NO_MATCH", format!("no link matches {query:?}")))?;

    Ok(Json(SlugMatchResponse {
        best_match: best.url,
        slug: best.slug,
        rank: best.rank,
    }))
}

/// Link for one episode out of a labeled episode list
pub async fn episode(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EpisodeRequest>,
) -> ApiResult<Json<EpisodeLink>> {
    let episodes = state.episodes.collect(&request.links);

    find_episode(&episodes, request.episode)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found(
                "NO_EPISODE",
                format!("episode {} not found", request.episode),
            )
        })
}

/// Links keyed by the quality named in their label
pub async fn qualities(ApiJson(request): ApiJson<QualitiesRequest>) -> Json<QualitiesResponse> {
    Json(group_by_quality(&request.links))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> InputLimits {
        InputLimits {
            max_title_chars: 8,
            max_candidates: 2,
        }
    }

    #[test]
    fn titles_within_limits_pass() {
        let titles = vec!["Naruto".to_string(), "Bleach".to_string()];
        assert!(check_titles(&limits(), "naruto", &titles).is_ok());
    }

    #[test]
    fn long_title_is_rejected() {
        let titles = vec!["Naruto Shippuden".to_string()];
        let err = check_titles(&limits(), "naruto", &titles).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INPUT_TOO_LARGE");

        // Length is counted in chars: 8 two-byte chars are within the limit.
        assert!(check_titles(&limits(), "éééééééé", &[]).is_ok());
    }

    #[test]
    fn too_many_candidates_is_rejected() {
        let titles = vec!["a".to_string(); 3];
        let err = check_titles(&limits(), "a", &titles).unwrap_err();
        assert!(err.message.contains("3 candidates"));
    }
}
