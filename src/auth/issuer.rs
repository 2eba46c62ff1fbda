//! Access-token issuance seam.
//!
//! Signup and login hand the issuer a claims payload and merge whatever it
//! returns into the response body. The issuer owns the token format; this
//! crate never inspects the grant.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::error::Result;
use super::state::AuthService;
use super::types::{Role, User};

/// Claims handed to the issuer, one per authenticated user.
#[derive(Clone, Debug, Serialize)]
pub struct TokenRequest {
    pub id: Uuid,
    pub role: Role,
}

/// Opaque grant returned by the issuer, merged verbatim into auth responses.
pub type TokenGrant = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn create_token(&self, request: &TokenRequest) -> anyhow::Result<TokenGrant>;
}

impl AuthService {
    /// Requests a grant for an authenticated user.
    pub(super) async fn issue_grant(&self, user: &User) -> Result<TokenGrant> {
        let request = TokenRequest {
            id: user.id,
            role: user.role,
        };
        let grant = self.issuer.create_token(&request).await?;
        Ok(grant)
    }
}
