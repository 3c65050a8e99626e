use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::{EquipmentResource, Ownership},
    repositories::{EquipmentRepository, NewEquipmentResource},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_equipment).post(add_equipment))
        .route("/:id", put(update_equipment).delete(delete_equipment))
}

#[instrument(name = "GET /resources/equipment", skip(app_state))]
async fn get_equipment(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<EquipmentResource>>, ApiError> {
    let entries = app_state.equipment_repo.get_equipment_entries().await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EquipmentBody {
    name: String,
    category: String,
    charge_out_rate: f64,
    night_rate: f64,
    owned_or_hired: Ownership,
    supplier: String,
    #[serde(default)]
    notes: String,
}

impl From<EquipmentBody> for NewEquipmentResource {
    fn from(body: EquipmentBody) -> Self {
        Self {
            name: body.name,
            category: body.category,
            charge_out_rate: body.charge_out_rate,
            night_rate: body.night_rate,
            owned_or_hired: body.owned_or_hired,
            supplier: body.supplier,
            notes: body.notes,
        }
    }
}

#[instrument(name = "POST /resources/equipment", skip(app_state, body))]
async fn add_equipment(
    State(app_state): State<AppState>,
    Json(body): Json<EquipmentBody>,
) -> Result<Json<EquipmentResource>, ApiError> {
    let entry = app_state
        .equipment_repo
        .add_equipment_entry(&body.into())
        .await?;
    Ok(Json(entry))
}

#[instrument(name = "PUT /resources/equipment/:id", skip(app_state, body))]
async fn update_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<EquipmentBody>,
) -> Result<Json<EquipmentResource>, ApiError> {
    let entry = app_state
        .equipment_repo
        .update_equipment_entry(id, &body.into())
        .await?;
    Ok(Json(entry))
}

#[instrument(name = "DELETE /resources/equipment/:id", skip(app_state))]
async fn delete_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<()>, ApiError> {
    app_state.equipment_repo.delete_equipment_entry(id).await?;
    Ok(Json(()))
}
