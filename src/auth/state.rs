//! Auth configuration and orchestrator state.

use std::sync::Arc;

use super::email::EmailSender;
use super::issuer::TokenIssuer;
use super::storage::{PermissionStore, ResetTokenStore, UserStore};

const DEFAULT_TOKEN_EXP_SECONDS: i64 = 60 * 60;
const DEFAULT_BCRYPT_COST: u32 = 10;

// bcrypt's accepted cost range.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Clone, Copy, Debug)]
pub struct AuthConfig {
    token_exp_seconds: i64,
    bcrypt_cost: u32,
}

impl AuthConfig {
    /// Default config: one hour reset-token TTL, bcrypt work factor 10.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_exp_seconds: DEFAULT_TOKEN_EXP_SECONDS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Reset-token time-to-live, in seconds.
    #[must_use]
    pub fn with_token_exp_seconds(mut self, seconds: i64) -> Self {
        self.token_exp_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn normalize(self) -> Self {
        let token_exp_seconds = self.token_exp_seconds.max(1);
        let bcrypt_cost = self.bcrypt_cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);
        Self {
            token_exp_seconds,
            bcrypt_cost,
        }
    }

    #[must_use]
    pub fn token_exp_seconds(&self) -> i64 {
        self.token_exp_seconds
    }

    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The auth orchestrator.
///
/// Holds no state of its own; everything lives in the injected stores, and
/// each operation runs to completion within one call.
pub struct AuthService {
    pub(super) config: AuthConfig,
    pub(super) users: Arc<dyn UserStore>,
    pub(super) tokens: Arc<dyn ResetTokenStore>,
    pub(super) permissions: Arc<dyn PermissionStore>,
    pub(super) issuer: Arc<dyn TokenIssuer>,
    pub(super) mail: Arc<dyn EmailSender>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        config: AuthConfig,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn ResetTokenStore>,
        permissions: Arc<dyn PermissionStore>,
        issuer: Arc<dyn TokenIssuer>,
        mail: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            config: config.normalize(),
            users,
            tokens,
            permissions,
            issuer,
            mail,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
