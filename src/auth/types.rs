//! Domain types for the auth core.
//!
//! [`User`] is the stored record and carries the password hash; it is never
//! serialized. [`UserView`] is the sanitized projection used in every value
//! returned across the service boundary.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(anyhow!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenStatus {
    Active,
    Consumed,
}

impl TokenStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Consumed => "CONSUMED",
        }
    }
}

impl FromStr for TokenStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "CONSUMED" => Ok(Self::Consumed),
            other => Err(anyhow!("unknown token status: {other}")),
        }
    }
}

/// Stored user record. The `password` field holds the bcrypt hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub device_token: Option<String>,
}

/// Fields for a user about to be persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Caller-facing projection of a user, without the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub device_token: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            device_token: user.device_token,
        }
    }
}

/// Stored password-reset token row.
#[derive(Debug, Clone)]
pub struct ResetToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub forgot_token: String,
    pub status: TokenStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResetToken {
    pub user_id: Uuid,
    pub forgot_token: String,
    pub status: TokenStatus,
}

/// Reset token as returned to the caller, with the sanitized owner embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenView {
    pub id: Uuid,
    pub forgot_token: String,
    pub status: TokenStatus,
    pub created_at: DateTime<Utc>,
    pub user: UserView,
}

/// One row of the static permission seed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionSeed {
    pub permission: &'static str,
    pub role: Role,
}

#[derive(Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct ChangePasswordRequest {
    pub token: String,
    pub new_password: SecretString,
}

/// Signup/login result: the issuer's opaque grant merged verbatim with the
/// sanitized user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub grant: serde_json::Map<String, serde_json::Value>,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            role: Role::User,
            device_token: None,
        }
    }

    #[test]
    fn role_round_trips_through_strings() -> Result<()> {
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert_eq!("USER".parse::<Role>()?, Role::User);
        assert!("user".parse::<Role>().is_err());
        Ok(())
    }

    #[test]
    fn token_status_round_trips_through_strings() -> Result<()> {
        assert_eq!(TokenStatus::Active.as_str(), "ACTIVE");
        assert_eq!("CONSUMED".parse::<TokenStatus>()?, TokenStatus::Consumed);
        assert!("stale".parse::<TokenStatus>().is_err());
        Ok(())
    }

    #[test]
    fn user_view_never_serializes_a_password() -> Result<()> {
        let view = UserView::from(sample_user());
        let value = serde_json::to_value(&view)?;
        let object = value.as_object().context("expected an object")?;
        assert!(!object.contains_key("password"));
        assert_eq!(
            object.get("firstName").and_then(serde_json::Value::as_str),
            Some("Alice")
        );
        assert_eq!(
            object.get("role").and_then(serde_json::Value::as_str),
            Some("USER")
        );
        Ok(())
    }

    #[test]
    fn auth_response_merges_the_grant_verbatim() -> Result<()> {
        let mut grant = serde_json::Map::new();
        grant.insert(
            "accessToken".to_string(),
            serde_json::Value::String("jwt".to_string()),
        );
        let response = AuthResponse {
            grant,
            user: UserView::from(sample_user()),
        };
        let value = serde_json::to_value(&response)?;
        assert_eq!(
            value.get("accessToken").and_then(serde_json::Value::as_str),
            Some("jwt")
        );
        assert!(value.get("user").is_some());
        Ok(())
    }

    #[test]
    fn reset_token_view_serializes_wire_casing() -> Result<()> {
        let view = ResetTokenView {
            id: Uuid::new_v4(),
            forgot_token: "tok_123456".to_string(),
            status: TokenStatus::Active,
            created_at: Utc::now(),
            user: UserView::from(sample_user()),
        };
        let value = serde_json::to_value(&view)?;
        let object = value.as_object().context("expected an object")?;
        assert!(object.contains_key("forgotToken"));
        assert!(object.contains_key("createdAt"));
        assert_eq!(
            object.get("status").and_then(serde_json::Value::as_str),
            Some("ACTIVE")
        );
        Ok(())
    }
}
