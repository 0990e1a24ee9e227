//! Authentication module
//!
//! JWT issuance and validation, the static credential store, and the access
//! guard that turns bearer tokens into role-checked identities.

mod credentials;
mod guard;
mod jwt;
mod middleware;
mod password;

pub use credentials::{Credential, CredentialStore};
pub use guard::{AccessGuard, Identity};
pub use jwt::{Claims, JwtService, MAX_TOKEN_TTL_SECS};
pub use middleware::{bearer_token, AdminUser};
pub use password::PasswordService;
