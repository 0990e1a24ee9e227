//! Configuration management for the appointment booking backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: BOOKING__)

use crate::auth::{PasswordService, MAX_TOKEN_TTL_SECS};
use anyhow::Result;
use appointment_booking_shared::Role;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Secret shipped for local development only
pub const DEVELOPMENT_SECRET: &str = "development-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JWT configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_expiry_secs: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .finish()
    }
}

/// One entry of the credential store
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub username: String,
    /// Plaintext, or an argon2 PHC string
    pub password: String,
    pub role: Role,
}

impl CredentialConfig {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            jwt: JwtConfig {
                secret: DEVELOPMENT_SECRET.to_string(),
                algorithm: Algorithm::HS256,
                access_token_expiry_secs: 1800, // 30 minutes
            },
            credentials: vec![
                CredentialConfig::new("admin", "admin123", Role::Admin),
                CredentialConfig::new("user", "user123", Role::User),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with BOOKING__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (BOOKING__ prefix)
            // e.g., BOOKING__JWT__SECRET=... sets jwt.secret
            .add_source(config::Environment::with_prefix("BOOKING").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that apply in every environment
    pub fn validate(&self) -> Result<()> {
        if !matches!(
            self.jwt.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            anyhow::bail!(
                "JWT algorithm {:?} is not supported, use HS256, HS384 or HS512",
                self.jwt.algorithm
            );
        }

        let ttl = self.jwt.access_token_expiry_secs;
        if ttl <= 0 || ttl > MAX_TOKEN_TTL_SECS {
            anyhow::bail!(
                "jwt.access_token_expiry_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS,
                ttl
            );
        }

        for credential in &self.credentials {
            if credential.username.is_empty() {
                anyhow::bail!("credential usernames must not be empty");
            }
            PasswordService::check_stored(&credential.password).map_err(|e| {
                anyhow::anyhow!("credential '{}': {}", credential.username, e)
            })?;
        }

        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.jwt.access_token_expiry_secs, 1800);
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.credentials.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let mut config = AppConfig::default();
        config.jwt.algorithm = Algorithm::RS256;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let mut config = AppConfig::default();
        config.jwt.access_token_expiry_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_expiry_rejected() {
        for secs in [MAX_TOKEN_TTL_SECS + 1, 10_000_000_000_000, i64::MAX] {
            let mut config = AppConfig::default();
            config.jwt.access_token_expiry_secs = secs;
            assert!(config.validate().is_err(), "accepted ttl {}", secs);
        }

        let mut config = AppConfig::default();
        config.jwt.access_token_expiry_secs = MAX_TOKEN_TTL_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_password_hash_rejected() {
        let mut config = AppConfig::default();
        config
            .credentials
            .push(CredentialConfig::new("carol", "$argon2id$garbage", Role::User));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hashed_password_accepted() {
        let hash = PasswordService::hash("s3cret").unwrap();
        let mut config = AppConfig::default();
        config
            .credentials
            .push(CredentialConfig::new("carol", &hash, Role::User));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut config = AppConfig::default();
        config.credentials.push(CredentialConfig::new("", "pw", Role::User));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AppConfig::default();
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains(DEVELOPMENT_SECRET));
        assert!(!debug_str.contains("admin123"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_defaults_survive_config_layering() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let config: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(config.credentials[0].username, "admin");
        assert_eq!(config.credentials[0].role, Role::Admin);
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
    }
}
