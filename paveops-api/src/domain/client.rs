use serde::Serialize;
use sqlx::FromRow;

/// A client the contractor quotes and works for.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub client_type: String,
    pub notes: String,
}
