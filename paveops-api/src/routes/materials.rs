use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use pricing::MaterialType;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::MaterialResource,
    repositories::{MaterialRepository, NewMaterialResource},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_materials).post(add_material))
        .route("/:id", put(update_material).delete(delete_material))
}

#[instrument(name = "GET /resources/materials", skip(app_state))]
async fn get_materials(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MaterialResource>>, ApiError> {
    let materials = app_state.material_repo.get_materials().await?;
    Ok(Json(materials))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaterialBody {
    name: String,
    purchase_price: f64,
    #[serde(rename = "type")]
    material_type: MaterialType,
    measurement_unit: String,
    formula_constant: Option<f64>,
    supplier: String,
    #[serde(default)]
    notes: String,
}

impl From<MaterialBody> for NewMaterialResource {
    fn from(body: MaterialBody) -> Self {
        Self {
            name: body.name,
            purchase_price: body.purchase_price,
            material_type: body.material_type,
            measurement_unit: body.measurement_unit,
            formula_constant: body.formula_constant,
            supplier: body.supplier,
            notes: body.notes,
        }
    }
}

#[instrument(name = "POST /resources/materials", skip(app_state, body))]
async fn add_material(
    State(app_state): State<AppState>,
    Json(body): Json<MaterialBody>,
) -> Result<Json<MaterialResource>, ApiError> {
    let material = app_state.material_repo.add_material(&body.into()).await?;
    Ok(Json(material))
}

#[instrument(name = "PUT /resources/materials/:id", skip(app_state, body))]
async fn update_material(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<MaterialBody>,
) -> Result<Json<MaterialResource>, ApiError> {
    let material = app_state
        .material_repo
        .update_material(id, &body.into())
        .await?;
    Ok(Json(material))
}

#[instrument(name = "DELETE /resources/materials/:id", skip(app_state))]
async fn delete_material(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<()>, ApiError> {
    app_state.material_repo.delete_material(id).await?;
    Ok(Json(()))
}
