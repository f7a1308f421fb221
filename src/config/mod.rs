use crate::error::{Result, ServiceError};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Security configuration
    pub security: SecurityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which paths need credentials and how they are checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Path prefixes that require authentication
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
    /// JWT configuration
    pub jwt: JwtConfig,
}

/// JWT authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for HS256 (if using symmetric encryption)
    pub secret: Option<String>,
    /// Public key for RS256 (if using asymmetric encryption)
    pub public_key: Option<String>,
    /// Algorithm to use (HS256 or RS256)
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    /// Issuer to validate
    pub issuer: Option<String>,
    /// Audience to validate
    pub audience: Option<String>,
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_protected_paths() -> Vec<String> {
    vec!["/api".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for path in &self.security.protected_paths {
            if path.is_empty() {
                return Err(ServiceError::Config(
                    "Protected path cannot be empty".to_string(),
                ));
            }

            if !path.starts_with('/') {
                return Err(ServiceError::Config(format!(
                    "Protected path must start with '/': {}",
                    path
                )));
            }
        }

        self.security.jwt.validate()
    }
}

impl JwtConfig {
    /// Parse the configured algorithm name
    pub fn algorithm(&self) -> Result<Algorithm> {
        match self.algorithm.to_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            "RS256" => Ok(Algorithm::RS256),
            "RS384" => Ok(Algorithm::RS384),
            "RS512" => Ok(Algorithm::RS512),
            _ => Err(ServiceError::Config(format!(
                "Unsupported JWT algorithm: {}",
                self.algorithm
            ))),
        }
    }

    /// Check that the algorithm is supported and its key material is present
    pub fn validate(&self) -> Result<()> {
        let algorithm = self.algorithm()?;
        let (key, name) = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => (&self.secret, "secret"),
            _ => (&self.public_key, "public key"),
        };

        if key.as_deref().map_or(true, str::is_empty) {
            return Err(ServiceError::Config(format!(
                "JWT {} is required for {:?}",
                name, algorithm
            )));
        }

        Ok(())
    }
}
