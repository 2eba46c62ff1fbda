//! Credential login.

use tracing::instrument;

use super::error::{AuthError, Result};
use super::state::AuthService;
use super::types::{AuthResponse, LoginRequest};
use super::utils::verify_password;

impl AuthService {
    /// Exchanges email and password for an access grant.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(&user.password, &request.password)? {
            return Err(AuthError::InvalidPassword);
        }

        let grant = self.issue_grant(&user).await?;
        Ok(AuthResponse {
            grant,
            user: user.into(),
        })
    }
}
