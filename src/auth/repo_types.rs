use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRecord {
    pub student_id: String, // primary key, immutable
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub image_data: Option<Vec<u8>>, // profile image, absent for most records
    pub mime_type: Option<String>, // encoding of image_data when present
}

/// Profile image bytes paired with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl StudentRecord {
    /// Image and MIME type have no independent lifecycle; a half-present
    /// pair reads as absent.
    pub fn profile_image(&self) -> Option<ProfileImage> {
        match (&self.image_data, &self.mime_type) {
            (Some(data), Some(mime)) if !data.is_empty() => Some(ProfileImage {
                data: data.clone(),
                mime_type: mime.clone(),
            }),
            _ => None,
        }
    }
}
