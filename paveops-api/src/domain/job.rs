use serde::Serialize;
use sqlx::FromRow;
use time::Date;

/// A scheduled job for a client, possibly spanning several site days.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub job_name: String,
    pub site_address: String,
    pub notes: String,
    pub job_dates: Vec<Date>,
    pub client_id: i32,
}
