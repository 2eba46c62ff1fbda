//! Account creation.

use tracing::instrument;

use super::error::{AuthError, Result};
use super::state::AuthService;
use super::storage::SaveUserOutcome;
use super::types::{AuthResponse, NewUser, Role, SignupRequest};
use super::utils::hash_password;

impl AuthService {
    /// Registers a new account and returns its first access grant.
    ///
    /// Accounts always start with the USER role; names are stored trimmed.
    #[instrument(skip(self, request))]
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password = hash_password(&request.password, self.config.bcrypt_cost())?;
        let new_user = NewUser {
            email: request.email,
            password,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            role: Role::User,
        };

        // The store may still hit a duplicate the lookup raced with.
        let user = match self.users.save(&new_user).await? {
            SaveUserOutcome::Created(user) => user,
            SaveUserOutcome::DuplicateEmail => return Err(AuthError::UserExists),
        };

        let grant = self.issue_grant(&user).await?;
        Ok(AuthResponse {
            grant,
            user: user.into(),
        })
    }
}
