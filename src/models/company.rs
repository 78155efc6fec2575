use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    #[serde(rename = "id_empresa")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompanyRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub logo: Option<String>,
}
