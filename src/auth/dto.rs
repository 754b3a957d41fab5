use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::auth::repo_types::ProfileImage;

/// Request body for registration. Missing fields deserialize to empty
/// strings so shape errors take the validation path, not a transport 422.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned by the register endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub student_id: String,
}

/// Response returned by the login endpoint. Every field is always present;
/// `image` is base64 of the stored bytes or empty.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub student_id: String,
    pub image: String,
    pub mime_type: String,
}

impl RegisterResponse {
    pub fn created(student_id: String) -> Self {
        Self {
            success: true,
            message: "Registration successful.".into(),
            student_id,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            student_id: String::new(),
        }
    }
}

impl LoginResponse {
    pub fn authenticated(student_id: String, image: Option<ProfileImage>) -> Self {
        match image {
            Some(img) => Self {
                success: true,
                message: "Login successful".into(),
                student_id,
                image: BASE64.encode(&img.data),
                mime_type: img.mime_type,
            },
            None => Self {
                success: true,
                message: "Verified, but no valid image data found.".into(),
                student_id,
                image: String::new(),
                mime_type: String::new(),
            },
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            student_id: String::new(),
            image: String::new(),
            mime_type: String::new(),
        }
    }
}
