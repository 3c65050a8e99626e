use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::Client,
    repositories::{ClientRepository, NewClient},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_clients).post(add_client))
        .route("/:id", put(update_client).delete(delete_client))
}

#[instrument(name = "GET /clients", skip(app_state))]
async fn get_clients(State(app_state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = app_state.client_repo.get_clients().await?;
    Ok(Json(clients))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientBody {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    client_type: String,
    #[serde(default)]
    notes: String,
}

impl From<ClientBody> for NewClient {
    fn from(body: ClientBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            client_type: body.client_type,
            notes: body.notes,
        }
    }
}

#[instrument(name = "POST /clients", skip(app_state, body))]
async fn add_client(
    State(app_state): State<AppState>,
    Json(body): Json<ClientBody>,
) -> Result<Json<Client>, ApiError> {
    let client = app_state.client_repo.add_client(&body.into()).await?;
    Ok(Json(client))
}

#[instrument(name = "PUT /clients/:id", skip(app_state, body))]
async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ClientBody>,
) -> Result<Json<Client>, ApiError> {
    let client = app_state
        .client_repo
        .update_client(id, &body.into())
        .await?;
    Ok(Json(client))
}

#[instrument(name = "DELETE /clients/:id", skip(app_state))]
async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<()>, ApiError> {
    app_state.client_repo.delete_client(id).await?;
    Ok(Json(()))
}
