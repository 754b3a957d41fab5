use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        error::AuthError,
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn log_error(op: &str, e: &AuthError) {
    match e {
        AuthError::Validation(msg) => warn!(%msg, "{op} validation failed"),
        AuthError::DuplicateIdentity => warn!("{op} duplicate student id"),
        AuthError::InvalidCredentials => warn!("{op} invalid credentials"),
        AuthError::StoreUnavailable(source) => error!(error = ?source, "{op} store unavailable"),
        AuthError::Internal(source) => error!(error = ?source, "{op} internal error"),
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> (StatusCode, Json<RegisterResponse>) {
    // Absent or non-JSON bodies fall through to the validation path.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    match services::register(&state.db, payload).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(RegisterResponse::created(created.student_id)),
        ),
        Err(e) => {
            log_error("register", &e);
            (
                e.register_status(),
                Json(RegisterResponse::failure(e.public_message())),
            )
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> (StatusCode, Json<LoginResponse>) {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    match services::login(&state.db, payload).await {
        Ok(auth) => {
            info!(student_id = %auth.student_id, "login successful");
            (
                StatusCode::OK,
                Json(LoginResponse::authenticated(auth.student_id, auth.image)),
            )
        }
        Err(e) => {
            log_error("login", &e);
            (
                e.login_status(),
                Json(LoginResponse::failure(e.public_message())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_and_wrong_password_are_indistinguishable() {
        // Both paths end in the same variant, so status and message are
        // identical by construction.
        let unknown = AuthError::InvalidCredentials;
        let wrong_pw = AuthError::InvalidCredentials;
        assert_eq!(unknown.login_status(), wrong_pw.login_status());
        assert_eq!(unknown.public_message(), wrong_pw.public_message());

        let body = serde_json::to_value(LoginResponse::failure(unknown.public_message())).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid Credentials.");
    }

    #[test]
    fn register_response_serialization() {
        let json = serde_json::to_value(RegisterResponse::created("stu-0001".into())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["student_id"], "stu-0001");
        assert!(json.get("password").is_none());
    }
}
