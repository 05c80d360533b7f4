//! Catalog and account records exchanged over the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_WORDS: usize = 512;
pub const ALLOWED_MODEL_EXTENSION: &str = ".glb";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mineral {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub model_path: String,
    pub preview_image_path: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a create request, also the shape of seed file entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMineral {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub model_path: String,
    #[serde(default)]
    pub preview_image_path: String,
}

/// Partial update; absent or empty fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MineralUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub preview_image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    TitleTooLong,
    DescriptionTooLong,
    InvalidModelPath,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "mineral title must not be empty"),
            ValidationError::TitleTooLong => {
                write!(f, "mineral title exceeds {} bytes", MAX_TITLE_LENGTH)
            }
            ValidationError::DescriptionTooLong => {
                write!(f, "description exceeds {} words", MAX_DESCRIPTION_WORDS)
            }
            ValidationError::InvalidModelPath => {
                write!(f, "model path must end with {}", ALLOWED_MODEL_EXTENSION)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_fields(
    title: &str,
    description: &str,
    model_path: &str,
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    if description.split_whitespace().count() > MAX_DESCRIPTION_WORDS {
        return Err(ValidationError::DescriptionTooLong);
    }
    if !model_path.ends_with(ALLOWED_MODEL_EXTENSION) {
        return Err(ValidationError::InvalidModelPath);
    }
    Ok(())
}

impl Mineral {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.description, &self.model_path)
    }

    /// Apply the non-empty fields of `update`
    pub fn apply(&mut self, update: MineralUpdate) {
        fn take(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *target = value;
            }
        }
        take(&mut self.title, update.title);
        take(&mut self.description, update.description);
        take(&mut self.model_path, update.model_path);
        take(&mut self.preview_image_path, update.preview_image_path);
    }

    /// Copy with title and description replaced
    pub fn translated(&self, title: String, description: String) -> Self {
        Self {
            title,
            description,
            ..self.clone()
        }
    }
}

impl NewMineral {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.description, &self.model_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Self-service signup; `role` defaults to `user`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}
