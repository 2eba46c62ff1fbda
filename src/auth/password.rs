//! Password recovery: reset-token issuance and the password change itself.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::email::EmailPayload;
use super::error::{AuthError, Result};
use super::state::AuthService;
use super::types::{ChangePasswordRequest, NewResetToken, ResetTokenView, TokenStatus};
use super::utils::{generate_reset_token, hash_password};

impl AuthService {
    /// Issues a fresh reset token for the user.
    ///
    /// Earlier tokens stay untouched; only the supplied value unlocks a
    /// change, and each token works at most once.
    #[instrument(skip(self))]
    pub async fn forgot_password_token(&self, user_id: Uuid) -> Result<ResetTokenView> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let new_token = NewResetToken {
            user_id: user.id,
            forgot_token: generate_reset_token()?,
            status: TokenStatus::Active,
        };
        let token = self.tokens.save(&new_token).await?;

        Ok(ResetTokenView {
            id: token.id,
            forgot_token: token.forgot_token,
            status: token.status,
            created_at: token.created_at,
            user: user.into(),
        })
    }

    /// Replaces the user's password, guarded by an active reset token.
    ///
    /// The token must be inside its expiry window and is consumed on
    /// success. The notification email never blocks the call and its
    /// failure is only logged.
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self
            .tokens
            .find_active(user.id, &request.token)
            .await?
            .ok_or(AuthError::ActiveTokenNotFound)?;

        let expires_at = token.created_at + Duration::seconds(self.config.token_exp_seconds());
        if Utc::now() > expires_at {
            return Err(AuthError::ForgotTokenExpired);
        }

        let password = hash_password(&request.new_password, self.config.bcrypt_cost())?;
        self.users.update_password(user.id, &password).await?;
        self.tokens.mark_consumed(token.id).await?;

        let mail = Arc::clone(&self.mail);
        let message =
            EmailPayload::forgot_password(&user.email, &user.first_name, &user.last_name);
        tokio::spawn(async move {
            if let Err(err) = mail.send(&message).await {
                warn!(error = %err, "password change notification failed");
            }
        });

        Ok(())
    }
}
