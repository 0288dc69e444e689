//! Request extractors with enveloped rejections.
//!
//! The stock axum extractors reject with plain-text bodies; these wrappers
//! route every rejection through [`ApiError`] so malformed JSON, bad query
//! strings, and non-UUID path parameters all produce the standard
//! `{success: false, message}` envelope with status 400.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON body extractor rejecting with the standard envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor rejecting with the standard envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path-parameter extractor rejecting with the standard envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
