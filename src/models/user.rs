use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
    /// Argon2 PHC string. Never leaves the process.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub nickname: Option<String>,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha", deserialize_with = "super::lenient::text_or_number")]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl LoginResponse {
    pub fn accepted(user: User) -> Self {
        Self { success: true, user: Some(user) }
    }

    pub fn rejected() -> Self {
        Self { success: false, user: None }
    }
}
