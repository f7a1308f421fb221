use crate::error::AuthenticationFailure;
use axum::{http::request::Parts, http::StatusCode, response::Response};

/// Callback invoked when a request to a protected resource is not authenticated.
pub type EntryPoint = fn(&Parts, &mut Response, &AuthenticationFailure);

/// Answer an unauthenticated request with `401 Unauthorized`.
///
/// Only the status line is touched. The body and headers stay whatever the
/// caller built, and the failure detail is ignored.
pub fn commence(_request: &Parts, response: &mut Response, _failure: &AuthenticationFailure) {
    *response.status_mut() = StatusCode::UNAUTHORIZED;
}
