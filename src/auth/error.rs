//! Auth error taxonomy.
//!
//! Every domain check raises its specific kind; callers that prefer an
//! opaque boundary (everything collapsed into an internal failure) can
//! apply [`AuthError::into_internal`] at the edge.

use thiserror::Error;

/// Broad error classes for callers that do not care about the exact code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Expired,
    Internal,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("USER_NOT_FOUND")]
    UserNotFound,

    #[error("USER_EXISTS")]
    UserExists,

    #[error("INVALID_PASSWORD")]
    InvalidPassword,

    #[error("ACTIVE_TOKEN_NOT_FOUND")]
    ActiveTokenNotFound,

    #[error("FORGOT_TOKEN_EXPIRED")]
    ForgotTokenExpired,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound | Self::ActiveTokenNotFound => ErrorKind::NotFound,
            Self::UserExists | Self::InvalidPassword => ErrorKind::Conflict,
            Self::ForgotTokenExpired => ErrorKind::Expired,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Error code surfaced verbatim to callers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::ActiveTokenNotFound => "ACTIVE_TOKEN_NOT_FOUND",
            Self::ForgotTokenExpired => "FORGOT_TOKEN_EXPIRED",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Collapse into an undifferentiated internal failure, keeping the
    /// original code in the message chain.
    #[must_use]
    pub fn into_internal(self) -> Self {
        match self {
            Self::Internal(_) => self,
            other => Self::Internal(anyhow::anyhow!("{}", other.code())),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
