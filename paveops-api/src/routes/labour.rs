use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::LabourResource,
    repositories::{LabourRepository, NewLabourResource},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_labour).post(add_labour))
        .route("/:id", put(update_labour).delete(delete_labour))
}

#[instrument(name = "GET /resources/labour", skip(app_state))]
async fn get_labour(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<LabourResource>>, ApiError> {
    let entries = app_state.labour_repo.get_labour_entries().await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabourBody {
    name: String,
    role: String,
    cost_rate: f64,
    charge_out_rate: f64,
    night_rate: f64,
    #[serde(default)]
    notes: String,
}

impl From<LabourBody> for NewLabourResource {
    fn from(body: LabourBody) -> Self {
        Self {
            name: body.name,
            role: body.role,
            cost_rate: body.cost_rate,
            charge_out_rate: body.charge_out_rate,
            night_rate: body.night_rate,
            notes: body.notes,
        }
    }
}

#[instrument(name = "POST /resources/labour", skip(app_state, body))]
async fn add_labour(
    State(app_state): State<AppState>,
    Json(body): Json<LabourBody>,
) -> Result<Json<LabourResource>, ApiError> {
    let entry = app_state.labour_repo.add_labour_entry(&body.into()).await?;
    Ok(Json(entry))
}

#[instrument(name = "PUT /resources/labour/:id", skip(app_state, body))]
async fn update_labour(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<LabourBody>,
) -> Result<Json<LabourResource>, ApiError> {
    let entry = app_state
        .labour_repo
        .update_labour_entry(id, &body.into())
        .await?;
    Ok(Json(entry))
}

#[instrument(name = "DELETE /resources/labour/:id", skip(app_state))]
async fn delete_labour(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<()>, ApiError> {
    app_state.labour_repo.delete_labour_entry(id).await?;
    Ok(Json(()))
}
