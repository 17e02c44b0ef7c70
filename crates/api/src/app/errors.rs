//! Uniform error responses.
//!
//! Every failure crossing the HTTP boundary is one of five stable kinds plus
//! a generic internal fault. Internal details are logged server-side and
//! never serialized into a response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use climabill_auth::{AuthError, AuthzError};
use climabill_core::DomainError;
use climabill_infra::IdentityError;
use climabill_marketplace::MarketError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The single credential-failure message. Wrong password, unknown
    /// email, forged token and expired token all produce this exact body.
    #[error("invalid credentials")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Unexpected server fault; the payload is for the log, not the caller.
    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind.
    fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_failed",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!("internal fault: {detail}");
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidId(msg) => Self::Validation(msg),
            DomainError::InvariantViolation(msg) => Self::Conflict(msg),
            DomainError::NotFound => Self::NotFound("not found".to_string()),
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Unauthorized => Self::Forbidden("unauthorized".to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredential => Self::Unauthenticated,
            AuthError::Crypto(detail) => Self::Internal(detail),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        Self::Forbidden(err.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailTaken => Self::Conflict(err.to_string()),
            IdentityError::NotFound => Self::NotFound("not found".to_string()),
            IdentityError::TenantMismatch => Self::Internal(err.to_string()),
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::ListingNotFound => Self::NotFound(err.to_string()),
            MarketError::InsufficientCredits | MarketError::InvalidAmount => {
                Self::Validation(err.to_string())
            }
        }
    }
}
