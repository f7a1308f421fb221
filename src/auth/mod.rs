pub mod entry_point;
pub mod jwt;
pub mod middleware;

use crate::error::AuthenticationFailure;
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::collections::HashMap;

pub use entry_point::{commence, EntryPoint};

/// Authentication result containing caller information
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated subject
    pub subject: String,
    /// Additional claims or metadata
    pub claims: HashMap<String, serde_json::Value>,
}

/// Decides whether a request carries valid credentials.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> std::result::Result<AuthResult, AuthenticationFailure>;
}
