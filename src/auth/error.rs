use axum::http::StatusCode;

use crate::db::ConnectFailure;

/// Outcome kinds for register/login, part of every service signature.
///
/// `InvalidCredentials` is deliberately undifferentiated: an unknown id and a
/// wrong password produce the same variant, message and status.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("student id already registered")]
    DuplicateIdentity,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<ConnectFailure> for AuthError {
    fn from(e: ConnectFailure) -> Self {
        AuthError::StoreUnavailable(e.into())
    }
}

impl AuthError {
    /// Message safe to serialize into a response. Raw store and hash-library
    /// errors stay server-side.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => (*msg).to_string(),
            AuthError::DuplicateIdentity => "Student ID already registered.".to_string(),
            AuthError::InvalidCredentials => "Invalid Credentials.".to_string(),
            AuthError::StoreUnavailable(_) => "Database connectivity error.".to_string(),
            AuthError::Internal(_) => "An unexpected server error occurred.".to_string(),
        }
    }

    pub fn register_status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateIdentity => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Login keeps a uniform 200 for the authentication decision itself; the
    /// success flag in the body carries the outcome.
    pub fn login_status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::OK,
            AuthError::DuplicateIdentity => StatusCode::CONFLICT,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_status_per_kind() {
        assert_eq!(
            AuthError::Validation("x").register_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DuplicateIdentity.register_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::StoreUnavailable(anyhow::anyhow!("down")).register_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn login_reports_invalid_credentials_over_200() {
        assert_eq!(AuthError::InvalidCredentials.login_status(), StatusCode::OK);
        assert_eq!(
            AuthError::Validation("x").login_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::StoreUnavailable(anyhow::anyhow!("down")).login_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn public_messages_hide_internal_detail() {
        let err = AuthError::StoreUnavailable(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(err.public_message(), "Database connectivity error.");
        let err = AuthError::Internal(anyhow::anyhow!("argon2 parameter error"));
        assert!(!err.public_message().contains("argon2"));
    }
}
