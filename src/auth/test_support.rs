//! In-memory collaborators for exercising operations without Postgres or a
//! live token service.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::email::{EmailPayload, EmailSender};
use super::issuer::{TokenGrant, TokenIssuer, TokenRequest};
use super::state::{AuthConfig, AuthService};
use super::storage::{PermissionStore, ResetTokenStore, SaveUserOutcome, UserStore};
use super::types::{NewResetToken, NewUser, PermissionSeed, ResetToken, Role, TokenStatus, User};

pub(crate) const TEST_BCRYPT_COST: u32 = 4;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tokens: Vec<ResetToken>,
    permissions: Vec<(String, Role)>,
}

/// All three stores on one shared vector-backed state.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Rewrites a stored token's creation time, for expiry tests.
    pub(crate) fn backdate_token(&self, id: Uuid, created_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(token) = inner.tokens.iter_mut().find(|t| t.id == id) {
            token.created_at = created_at;
        }
    }

    pub(crate) fn token_status(&self, id: Uuid) -> Option<TokenStatus> {
        let inner = self.inner.lock().unwrap();
        inner.tokens.iter().find(|t| t.id == id).map(|t| t.status)
    }

    pub(crate) fn password_hash(&self, id: Uuid) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.password.clone())
    }

    pub(crate) fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub(crate) fn set_device_token(&self, id: Uuid, token: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.device_token = Some(token.to_string());
        }
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: &NewUser) -> Result<SaveUserOutcome> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(SaveUserOutcome::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password: user.password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            device_token: None,
        };
        inner.users.push(user.clone());
        Ok(SaveUserOutcome::Created(user))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.password = password_hash.to_string();
        }
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for MemoryStorage {
    async fn save(&self, token: &NewResetToken) -> Result<ResetToken> {
        let mut inner = self.inner.lock().unwrap();
        let token = ResetToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            forgot_token: token.forgot_token.clone(),
            status: token.status,
            created_at: Utc::now(),
        };
        inner.tokens.push(token.clone());
        Ok(token)
    }

    async fn find_active(&self, user_id: Uuid, forgot_token: &str) -> Result<Option<ResetToken>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tokens
            .iter()
            .filter(|t| {
                t.user_id == user_id
                    && t.forgot_token == forgot_token
                    && t.status == TokenStatus::Active
            })
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn mark_consumed(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(token) = inner.tokens.iter_mut().find(|t| t.id == id) {
            token.status = TokenStatus::Consumed;
        }
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for MemoryStorage {
    async fn insert_permissions(&self, seeds: &[PermissionSeed]) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        let mut inserted = 0;
        for seed in seeds {
            let key = (seed.permission.to_string(), seed.role);
            if !inner.permissions.contains(&key) {
                inner.permissions.push(key);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

/// Issuer that hands out a fixed grant and records every request.
pub(crate) struct StaticTokenIssuer {
    grant: TokenGrant,
    requests: Mutex<Vec<TokenRequest>>,
}

impl StaticTokenIssuer {
    pub(crate) fn new() -> Arc<Self> {
        let mut grant = TokenGrant::new();
        grant.insert("accessToken".to_string(), serde_json::json!("test-token"));
        Arc::new(Self {
            grant,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<TokenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for StaticTokenIssuer {
    async fn create_token(&self, request: &TokenRequest) -> Result<TokenGrant> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.grant.clone())
    }
}

pub(crate) struct FailingTokenIssuer;

#[async_trait]
impl TokenIssuer for FailingTokenIssuer {
    async fn create_token(&self, _request: &TokenRequest) -> Result<TokenGrant> {
        Err(anyhow!("token service unavailable"))
    }
}

/// Sender that forwards every message to the test over a channel.
pub(crate) struct RecordingEmailSender {
    sent: mpsc::UnboundedSender<EmailPayload>,
}

impl RecordingEmailSender {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EmailPayload>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent: tx }), rx)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailPayload) -> Result<()> {
        self.sent.send(message.clone()).expect("receiver dropped");
        Ok(())
    }
}

pub(crate) struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _message: &EmailPayload) -> Result<()> {
        Err(anyhow!("mailer unavailable"))
    }
}

pub(crate) fn test_config() -> AuthConfig {
    AuthConfig::new().with_bcrypt_cost(TEST_BCRYPT_COST)
}

pub(crate) fn service_with_config(
    config: AuthConfig,
    storage: &Arc<MemoryStorage>,
    issuer: Arc<dyn TokenIssuer>,
    mail: Arc<dyn EmailSender>,
) -> AuthService {
    AuthService::new(
        config,
        Arc::clone(storage) as Arc<dyn UserStore>,
        Arc::clone(storage) as Arc<dyn ResetTokenStore>,
        Arc::clone(storage) as Arc<dyn PermissionStore>,
        issuer,
        mail,
    )
}

pub(crate) fn service(
    storage: &Arc<MemoryStorage>,
    issuer: Arc<dyn TokenIssuer>,
    mail: Arc<dyn EmailSender>,
) -> AuthService {
    service_with_config(test_config(), storage, issuer, mail)
}
