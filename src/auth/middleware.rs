use super::{Authenticator, EntryPoint};
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Shared state for the authentication middleware
#[derive(Clone)]
pub struct AuthLayerState {
    authenticator: Arc<dyn Authenticator>,
    entry_point: EntryPoint,
    protected_paths: Arc<[String]>,
}

impl AuthLayerState {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        entry_point: EntryPoint,
        protected_paths: Vec<String>,
    ) -> Self {
        Self {
            authenticator,
            entry_point,
            protected_paths: protected_paths.into(),
        }
    }

    /// Whether `path` falls under one of the protected prefixes
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths
            .iter()
            .any(|prefix| path_under_prefix(path, prefix))
    }
}

/// Segment-aware prefix match: `/api` covers `/api` and `/api/x`, not `/apix`.
fn path_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Authenticate requests to protected paths, handing failures to the entry point
pub async fn require_auth(
    State(state): State<AuthLayerState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    match state.authenticator.authenticate(request.headers()).await {
        Ok(auth_result) => {
            debug!(subject = %auth_result.subject, "Authentication successful");
            request.extensions_mut().insert(auth_result);
            next.run(request).await
        }
        Err(failure) => {
            debug!(
                method = %request.method(),
                path = %request.uri().path(),
                failure = %failure,
                "Unauthenticated request to protected path"
            );
            let (parts, _) = request.into_parts();
            let mut response = Response::new(Body::empty());
            (state.entry_point)(&parts, &mut response, &failure);
            response
        }
    }
}
