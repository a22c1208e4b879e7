//! Short link and redirect resolution handlers

use axum::{
    extract::{Path, State},
    http::{header::HOST, HeaderMap},
    response::Redirect,
    Json,
};
use tracing::{debug, info};
use url::Url;

use super::AppState;
use crate::http::error::{ApiError, ApiResult};
use crate::http::extract::ApiQuery;
use crate::http::types::*;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Base URL that short links are served under, without a trailing slash.
///
/// `public_url` wins when configured. Otherwise the base is rebuilt from the
/// `Host` header, with the scheme taken from `X-Forwarded-Proto` (`http` if
/// absent). Empty when no usable host is available, which leaves the link
/// relative.
fn short_link_base(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(public) = &state.public_url {
        return public.as_str().trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|proto| proto.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .map(|proto| proto.trim().to_ascii_lowercase())
        .filter(|proto| proto == "http" || proto == "https")
        .unwrap_or_else(|| "http".to_string());

    headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .and_then(|host| Url::parse(&format!("{scheme}://{host}")).ok())
        // A bare authority only: no credentials, path or query smuggled in.
        .filter(|base| {
            base.username().is_empty()
                && base.password().is_none()
                && base.path() == "/"
                && base.query().is_none()
                && base.fragment().is_none()
        })
        .map(|base| base.as_str().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// `GET /q?q=<url>`: stores the URL under a fresh token
pub async fn shorten(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<ShortenParams>,
) -> ApiResult<Json<ShortenResponse>> {
    let target = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("missing query parameter \"q\""))?;

    let link = state.links.shorten(&target)?;
    let url = format!("{}/vid/{}", short_link_base(&state, &headers), link.token);

    info!(token = %link.token, live = state.links.len(), "short link issued");
    Ok(Json(ShortenResponse { url }))
}

/// `GET /vid/:id`: temporary redirect to the stored target
pub async fn redirect_short_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Redirect> {
    let target = state
        .links
        .resolve(&id)
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "short link not found or expired"))?;

    debug!(token = %id, %target, "redirecting short link");
    Ok(Redirect::temporary(target.as_str()))
}

/// `GET /resolve?url=<url>`: follows redirects down to a direct media URL
pub async fn resolve_redirects(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ResolveParams>,
) -> ApiResult<Json<ResolveResponse>> {
    let url = params
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("missing query parameter \"url\""))?;

    let resolved = state.resolver.resolve(&url).await?;

    Ok(Json(ResolveResponse {
        resolved_url: resolved.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::http::HeaderValue;

    fn state() -> AppState {
        AppState::from_config(&ServerConfig::default()).unwrap()
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn base_from_host_defaults_to_http() {
        let base = short_link_base(&state(), &headers(&[("host", "sagashi.local:7860")]));
        assert_eq!(base, "http://sagashi.local:7860");
    }

    #[test]
    fn base_honors_forwarded_proto() {
        let base = short_link_base(
            &state(),
            &headers(&[("host", "media.example"), ("x-forwarded-proto", "https, http")]),
        );
        assert_eq!(base, "https://media.example");

        let base = short_link_base(
            &state(),
            &headers(&[("host", "media.example"), ("x-forwarded-proto", "gopher")]),
        );
        assert_eq!(base, "http://media.example");
    }

    #[test]
    fn public_url_wins_over_headers() {
        let mut state = state();
        state.public_url = Some(Url::parse("https://short.example/").unwrap());
        let base = short_link_base(&state, &headers(&[("host", "internal:7860")]));
        assert_eq!(base, "https://short.example");
    }

    #[test]
    fn malformed_host_leaves_link_relative() {
        for host in ["evil.example/phish", "user@evil.example", "a b"] {
            let base = short_link_base(&state(), &headers(&[("host", host)]));
            assert_eq!(base, "", "{host}");
        }
        assert_eq!(short_link_base(&state(), &HeaderMap::new()), "");
    }
}
