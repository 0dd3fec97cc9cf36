use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::dto::{CreateWorkstation, ListQuery, UpdateWorkstation, WorkstationResponse};
use crate::store::{self, workstations};

use super::{ApiError, AppState};

pub async fn list_workstations(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<WorkstationResponse>>, ApiError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(store::DEFAULT_LIMIT);

    let rows = workstations::list(&state.db, skip, limit).await?;
    Ok(Json(rows.into_iter().map(WorkstationResponse::from).collect()))
}

pub async fn get_workstation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WorkstationResponse>, ApiError> {
    let row = workstations::get(&state.db, id).await?;
    Ok(Json(WorkstationResponse::from(row)))
}

pub async fn create_workstation(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkstation>,
) -> Result<Json<WorkstationResponse>, ApiError> {
    let row = workstations::create(&state.db, body).await?;
    Ok(Json(WorkstationResponse::from(row)))
}

pub async fn update_workstation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateWorkstation>,
) -> Result<Json<WorkstationResponse>, ApiError> {
    let row = workstations::update(&state.db, id, body).await?;
    Ok(Json(WorkstationResponse::from(row)))
}

pub async fn delete_workstation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    workstations::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
