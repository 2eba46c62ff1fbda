//! User lookups.

use tracing::instrument;
use uuid::Uuid;

use super::error::{AuthError, Result};
use super::state::AuthService;
use super::types::UserView;

impl AuthService {
    /// Sanitized profile for one user.
    #[instrument(skip(self))]
    pub async fn user_by_id(&self, id: Uuid) -> Result<UserView> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user.into())
    }

    /// The push device token registered for one user, if any.
    #[instrument(skip(self))]
    pub async fn device_token(&self, id: Uuid) -> Result<Option<String>> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user.device_token)
    }
}
