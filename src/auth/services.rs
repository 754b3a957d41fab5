use tracing::{debug, info};

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::auth::error::AuthError;
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::auth::repo;
use crate::auth::repo_types::ProfileImage;
use crate::db::Db;

/// Minimum length for both registration fields, shared with any front-end
/// validation; enforced again here since client-side checks are untrusted.
pub const MIN_CREDENTIAL_LEN: usize = 8;
/// Schema limit on the id column.
pub const MAX_STUDENT_ID_LEN: usize = 50;

#[derive(Debug)]
pub struct Registered {
    pub student_id: String,
}

#[derive(Debug)]
pub struct Authenticated {
    pub student_id: String,
    pub image: Option<ProfileImage>,
}

fn validate_registration(student_id: &str, password: &str) -> Result<(), AuthError> {
    if student_id.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("Please provide all information."));
    }
    if student_id.len() < MIN_CREDENTIAL_LEN || password.len() < MIN_CREDENTIAL_LEN {
        return Err(AuthError::Validation(
            "Student ID and password must be at least 8 characters.",
        ));
    }
    if student_id.len() > MAX_STUDENT_ID_LEN {
        return Err(AuthError::Validation(
            "Student ID must be at most 50 characters.",
        ));
    }
    Ok(())
}

// Length is an invariant of prior registration, not of login input.
fn validate_login(student_id: &str, password: &str) -> Result<(), AuthError> {
    if student_id.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("Please provide all information."));
    }
    Ok(())
}

/// Hash and insert a new student. The store's uniqueness constraint, not a
/// pre-check, decides the race between concurrent registrations of the same
/// id.
pub async fn register(db: &Db, req: RegisterRequest) -> Result<Registered, AuthError> {
    let student_id = req.student_id.trim().to_string();
    validate_registration(&student_id, &req.password)?;

    let hash = hash_password(&req.password).map_err(AuthError::Internal)?;

    let mut conn = db.acquire().await?;
    repo::insert_student(&mut conn, &student_id, &hash)
        .await
        .map_err(|e| {
            if repo::is_unique_violation(&e) {
                AuthError::DuplicateIdentity
            } else {
                AuthError::StoreUnavailable(e.into())
            }
        })?;

    info!(%student_id, "student registered");
    Ok(Registered { student_id })
}

/// Fetch and verify. Unknown id and wrong password collapse into the same
/// `InvalidCredentials`; the unknown-id path still pays a hash verification
/// so timing does not reveal whether the record exists.
pub async fn login(db: &Db, req: LoginRequest) -> Result<Authenticated, AuthError> {
    let student_id = req.student_id.trim().to_string();
    validate_login(&student_id, &req.password)?;

    let mut conn = db.acquire().await?;
    let record = repo::find_by_student_id(&mut conn, &student_id)
        .await
        .map_err(|e| AuthError::StoreUnavailable(e.into()))?;

    let Some(record) = record else {
        verify_against_dummy(&req.password);
        return Err(AuthError::InvalidCredentials);
    };

    let ok = verify_password(&req.password, &record.password_hash).map_err(AuthError::Internal)?;
    if !ok {
        return Err(AuthError::InvalidCredentials);
    }

    info!(student_id = %record.student_id, "login verified");
    let image = record.profile_image();
    Ok(Authenticated {
        student_id: record.student_id,
        image,
    })
}

/// Insert the demo record when `DEV_SEED` is set; a pre-existing record is
/// left untouched.
pub async fn seed_dev_user(db: &Db) -> Result<(), AuthError> {
    let req = RegisterRequest {
        student_id: "testuser".into(),
        password: "password123".into(),
    };
    match register(db, req).await {
        Ok(r) => {
            info!(student_id = %r.student_id, "dev user seeded");
            Ok(())
        }
        Err(AuthError::DuplicateIdentity) => {
            debug!("dev user already present");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_rejects_missing_fields() {
        let err = validate_registration("", "longenough").unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.public_message(), "Please provide all information.");

        let err = validate_registration("stu-0001", "").unwrap_err();
        assert_eq!(err.public_message(), "Please provide all information.");
    }

    #[test]
    fn registration_rejects_short_fields() {
        // Both under the minimum, as in the "short"/"short" property.
        let err = validate_registration("short", "short").unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        assert!(validate_registration("stu-0001", "short").is_err());
        assert!(validate_registration("short", "password123").is_err());
        assert!(validate_registration("stu-0001", "password123").is_ok());
    }

    #[test]
    fn registration_rejects_oversized_id() {
        let long_id = "x".repeat(51);
        let err = validate_registration(&long_id, "password123").unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let max_id = "x".repeat(50);
        assert!(validate_registration(&max_id, "password123").is_ok());
    }

    #[test]
    fn login_checks_presence_only() {
        assert!(validate_login("", "pw").is_err());
        assert!(validate_login("id", "").is_err());
        // No length floor at login time.
        assert!(validate_login("a", "b").is_ok());
    }
}
