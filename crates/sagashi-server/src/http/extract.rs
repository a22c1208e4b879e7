//! Extractors whose rejections use the `{ code, message }` error body.

use axum::extract::{FromRequest, FromRequestParts, Json, Query};

use super::error::ApiError;

/// `Json<T>` that rejects malformed bodies with a 400 [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query<T>` that rejects malformed query strings with a 400 [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
