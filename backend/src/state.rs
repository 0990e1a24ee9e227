//! Application state management
//!
//! Shared state passed to every handler via Axum's state extraction.
//! All fields are cheap to clone: the JWT keys, credential store and
//! appointment list sit behind `Arc`s.

use crate::auth::{AccessGuard, CredentialStore, JwtService};
use crate::config::AppConfig;
use crate::repositories::AppointmentRepository;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token verification and role checks
    pub guard: AccessGuard,
    /// In-memory appointment storage
    pub appointments: AppointmentRepository,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys and builds the credential store once; call at startup.
    pub fn new(config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.algorithm,
            config.jwt.access_token_expiry_secs,
        );
        let credentials = CredentialStore::from_config(&config.credentials);

        Self {
            config: Arc::new(config),
            guard: AccessGuard::new(jwt, credentials),
            appointments: AppointmentRepository::new(),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the access guard
    #[inline]
    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        self.guard.jwt()
    }

    /// Get a reference to the appointment repository
    #[inline]
    pub fn appointments(&self) -> &AppointmentRepository {
        &self.appointments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_repository() {
        let state = AppState::new(AppConfig::default());
        let cloned = state.clone();

        assert!(cloned.appointments().is_empty());
        assert_eq!(state.guard().credentials().len(), 2);
    }

    #[test]
    fn test_jwt_service_is_precomputed() {
        let state = AppState::new(AppConfig::default());

        let token = state.jwt().issue("admin", None).unwrap();
        assert!(!token.is_empty());
        assert_eq!(state.jwt().access_token_expiry_secs(), 1800);
    }
}
