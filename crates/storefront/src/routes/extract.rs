//! Query and path extractors that reject with the JSON error envelope.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `Query<T>` with bad parameters rejected as 400 envelopes.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `Path<T>` with unparseable segments rejected as 400 envelopes.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
