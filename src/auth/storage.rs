//! Persistence traits and their Postgres implementation.
//!
//! Operations depend on the traits only; [`PgStorage`] is the production
//! backend, wired in by the binary.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::types::{NewResetToken, NewUser, PermissionSeed, ResetToken, TokenStatus, User};
use super::utils::is_unique_violation;

/// Result of persisting a new user. Duplicate emails are an expected outcome,
/// not an error, so the conflict surfaces here instead of in the error chain.
#[derive(Debug)]
pub enum SaveUserOutcome {
    Created(User),
    DuplicateEmail,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn save(&self, user: &NewUser) -> Result<SaveUserOutcome>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()>;
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn save(&self, token: &NewResetToken) -> Result<ResetToken>;
    async fn find_active(&self, user_id: Uuid, forgot_token: &str) -> Result<Option<ResetToken>>;
    async fn mark_consumed(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Inserts the given rows, skipping ones already present. Returns the
    /// number actually inserted.
    async fn insert_permissions(&self, seeds: &[PermissionSeed]) -> Result<u64>;
}

/// Store implementations backed by a shared Postgres pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        role: role.parse()?,
        device_token: row.try_get("device_token")?,
    })
}

fn token_from_row(row: &PgRow) -> Result<ResetToken> {
    let status: String = row.try_get("status")?;
    Ok(ResetToken {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        forgot_token: row.try_get("forgot_token")?,
        status: status.parse()?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgStorage {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = "SELECT id, email, password, first_name, last_name, role, device_token \
                     FROM users WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to load user by id")?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = "SELECT id, email, password, first_name, last_name, role, device_token \
                     FROM users WHERE email = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to load user by email")?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn save(&self, user: &NewUser) -> Result<SaveUserOutcome> {
        let query = "INSERT INTO users (email, password, first_name, last_name, role) \
                     VALUES ($1, $2, $3, $4, $5) \
                     RETURNING id, email, password, first_name, last_name, role, device_token";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .instrument(span)
            .await;
        match result {
            Ok(row) => Ok(SaveUserOutcome::Created(user_from_row(&row)?)),
            Err(err) if is_unique_violation(&err) => Ok(SaveUserOutcome::DuplicateEmail),
            Err(err) => Err(err).context("failed to insert user"),
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let query = "UPDATE users SET password = $2 WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to update password")?;
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for PgStorage {
    async fn save(&self, token: &NewResetToken) -> Result<ResetToken> {
        let query = "INSERT INTO tokens (user_id, forgot_token, status) \
                     VALUES ($1, $2, $3) \
                     RETURNING id, user_id, forgot_token, status, created_at";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token.user_id)
            .bind(&token.forgot_token)
            .bind(token.status.as_str())
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .context("failed to insert reset token")?;
        token_from_row(&row)
    }

    async fn find_active(&self, user_id: Uuid, forgot_token: &str) -> Result<Option<ResetToken>> {
        let query = "SELECT id, user_id, forgot_token, status, created_at FROM tokens \
                     WHERE user_id = $1 AND forgot_token = $2 AND status = $3 \
                     ORDER BY created_at DESC LIMIT 1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(user_id)
            .bind(forgot_token)
            .bind(TokenStatus::Active.as_str())
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to load reset token")?;
        row.as_ref().map(token_from_row).transpose()
    }

    async fn mark_consumed(&self, id: Uuid) -> Result<()> {
        let query = "UPDATE tokens SET status = $2 WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(id)
            .bind(TokenStatus::Consumed.as_str())
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to consume reset token")?;
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for PgStorage {
    async fn insert_permissions(&self, seeds: &[PermissionSeed]) -> Result<u64> {
        let query = "INSERT INTO permissions (permission, role) VALUES ($1, $2) \
                     ON CONFLICT (permission, role) DO NOTHING";
        let mut inserted = 0;
        for seed in seeds {
            let span = info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "INSERT",
                db.statement = query
            );
            let result = sqlx::query(query)
                .bind(seed.permission)
                .bind(seed.role.as_str())
                .execute(&self.pool)
                .instrument(span)
                .await
                .context("failed to seed permission")?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}
