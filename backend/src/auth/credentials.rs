//! Static credential store, built once from configuration

use crate::config::CredentialConfig;
use appointment_booking_shared::Role;
use std::collections::HashMap;
use tracing::warn;

/// A known user
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Username -> credential lookup; read-only after construction
#[derive(Default)]
pub struct CredentialStore {
    users: HashMap<String, Credential>,
}

impl CredentialStore {
    pub fn from_config(entries: &[CredentialConfig]) -> Self {
        let mut users = HashMap::with_capacity(entries.len());
        for entry in entries {
            let credential = Credential {
                username: entry.username.clone(),
                password: entry.password.clone(),
                role: entry.role,
            };
            if users.insert(entry.username.clone(), credential).is_some() {
                warn!(username = %entry.username, "Duplicate credential, later entry wins");
            }
        }
        Self { users }
    }

    #[inline]
    pub fn get(&self, username: &str) -> Option<&Credential> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
