use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    #[serde(rename = "id_curso")]
    pub id: i64,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "nome_curso")]
    pub name: Option<String>,
    #[serde(rename = "instituicao")]
    pub institution: Option<String>,
    #[serde(rename = "empresa_id")]
    pub company_id: Option<i64>,
}

/// A course together with how many enrollments and comments point at it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseSummary {
    #[serde(rename = "id_curso")]
    pub id: i64,
    #[serde(rename = "nome_curso")]
    pub name: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "instituicao")]
    pub institution: Option<String>,
    #[serde(rename = "empresa_id")]
    pub company_id: Option<i64>,
    #[serde(rename = "numInscritos")]
    pub enrollment_count: i64,
    #[serde(rename = "numComentarios")]
    pub comment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    #[serde(rename = "nome_curso")]
    pub name: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "instituicao")]
    pub institution: Option<String>,
    #[serde(rename = "empresa_id")]
    pub company_id: Option<i64>,
}
