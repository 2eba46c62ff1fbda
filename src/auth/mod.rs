//! The auth core: signup, login, and password recovery.
//!
//! Persistence, token issuance, and outbound mail sit behind traits, so the
//! same orchestrator runs against Postgres and a live token service in
//! production and against in-memory doubles in tests.
//!
//! ## Reset tokens
//!
//! A reset token is 10 characters over the URL-safe base64 alphabet. It is
//! honored only while ACTIVE and inside the configured expiry window, and a
//! successful password change consumes it.

pub mod email;
pub mod error;
pub mod issuer;
mod login;
mod password;
pub mod seed;
mod signup;
pub mod state;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
mod users;
mod utils;

pub use error::{AuthError, ErrorKind, Result};
pub use state::{AuthConfig, AuthService};
pub use utils::{hash_password, verify_password};
