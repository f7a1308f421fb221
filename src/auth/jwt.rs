use crate::config::JwtConfig;
use crate::error::{AuthenticationFailure, Result, ServiceError};
use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AuthResult, Authenticator};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience, either a single string or an array of strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Bearer-token authenticator
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    /// Create a new JWT authenticator from configuration
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let algorithm = config.algorithm()?;

        let decoding_key = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                let secret = config.secret.as_ref().ok_or_else(|| {
                    ServiceError::Config(
                        "JWT secret is required for HS256/HS384/HS512 algorithms".to_string(),
                    )
                })?;
                DecodingKey::from_secret(secret.as_bytes())
            }
            _ => {
                let public_key = config.public_key.as_ref().ok_or_else(|| {
                    ServiceError::Config(
                        "JWT public key is required for RS256/RS384/RS512 algorithms".to_string(),
                    )
                })?;
                DecodingKey::from_rsa_pem(public_key.as_bytes()).map_err(|e| {
                    ServiceError::Config(format!("Invalid RSA public key: {}", e))
                })?
            }
        };

        let mut validation = Validation::new(algorithm);
        let mut required = vec!["exp"];

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }

        // Without a configured audience the `aud` claim is not checked at all
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
            required.push("aud");
        } else {
            validation.validate_aud = false;
        }

        validation.set_required_spec_claims(&required[..]);
        validation.validate_exp = true;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    fn decode_claims(&self, token: &str) -> std::result::Result<Claims, AuthenticationFailure> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthenticationFailure::ExpiredCredentials,
                _ => AuthenticationFailure::InvalidCredentials(e.to_string()),
            })
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> std::result::Result<AuthResult, AuthenticationFailure> {
        let token = extract_bearer(headers)?;
        let claims = self.decode_claims(token)?;

        let mut metadata = claims.extra;
        if let Some(iss) = claims.iss {
            metadata.insert("iss".to_string(), serde_json::Value::String(iss));
        }
        if let Some(aud) = claims.aud {
            metadata.insert("aud".to_string(), aud);
        }
        metadata.insert("exp".to_string(), serde_json::Value::Number(claims.exp.into()));

        Ok(AuthResult {
            subject: claims.sub,
            claims: metadata,
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn extract_bearer(headers: &HeaderMap) -> std::result::Result<&str, AuthenticationFailure> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthenticationFailure::MissingCredentials)?
        .to_str()
        .map_err(|_| {
            AuthenticationFailure::InvalidCredentials("Invalid authorization header".to_string())
        })?
        .trim();

    if value.is_empty() {
        return Err(AuthenticationFailure::MissingCredentials);
    }

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthenticationFailure::UnsupportedScheme(scheme.to_string()));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthenticationFailure::MissingCredentials);
    }

    Ok(token)
}
