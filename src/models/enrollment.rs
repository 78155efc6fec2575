use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    #[serde(rename = "id_inscricao")]
    pub id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "curso_id")]
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollmentRequest {
    #[serde(rename = "usuario_id", deserialize_with = "super::lenient::integer")]
    pub user_id: i64,
    #[serde(rename = "curso_id", deserialize_with = "super::lenient::integer")]
    pub course_id: i64,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub success: bool,
    #[serde(rename = "inscricao")]
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
