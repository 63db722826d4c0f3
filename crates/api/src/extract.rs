//! Extractor wrappers whose rejections go through [`AppError`].
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text bodies and a
//! mix of 400/415/422 statuses. Handlers take these wrappers instead so a
//! malformed request gets the same `{message, code}` body as every other error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
