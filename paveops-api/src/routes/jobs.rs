use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use time::Date;
use tracing::instrument;

use crate::{
    domain::Job,
    repositories::{JobRepository, NewJob},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_jobs).post(add_job))
}

#[instrument(name = "GET /jobs", skip(app_state))]
async fn get_jobs(State(app_state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = app_state.job_repo.get_jobs().await?;
    Ok(Json(jobs))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobBody {
    job_name: String,
    site_address: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    job_dates: Vec<Date>,
    client_id: i32,
}

impl From<JobBody> for NewJob {
    fn from(body: JobBody) -> Self {
        Self {
            job_name: body.job_name,
            site_address: body.site_address,
            notes: body.notes,
            job_dates: body.job_dates,
            client_id: body.client_id,
        }
    }
}

#[instrument(name = "POST /jobs", skip(app_state, body))]
async fn add_job(
    State(app_state): State<AppState>,
    Json(body): Json<JobBody>,
) -> Result<Json<Job>, ApiError> {
    let job = app_state.job_repo.add_job(&body.into()).await?;
    Ok(Json(job))
}
