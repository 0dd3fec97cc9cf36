use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::dto::{CreateWorkstationType, ListQuery, UpdateWorkstationType, WorkstationTypeResponse};
use crate::store::{self, workstation_types};

use super::{ApiError, AppState};

pub async fn list_workstation_types(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<WorkstationTypeResponse>>, ApiError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(store::DEFAULT_LIMIT);

    let rows = workstation_types::list(&state.db, skip, limit).await?;
    Ok(Json(
        rows.into_iter().map(WorkstationTypeResponse::from).collect(),
    ))
}

pub async fn get_workstation_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WorkstationTypeResponse>, ApiError> {
    let row = workstation_types::get(&state.db, id).await?;
    Ok(Json(WorkstationTypeResponse::from(row)))
}

pub async fn create_workstation_type(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkstationType>,
) -> Result<Json<WorkstationTypeResponse>, ApiError> {
    let row = workstation_types::create(&state.db, body).await?;
    Ok(Json(WorkstationTypeResponse::from(row)))
}

pub async fn update_workstation_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateWorkstationType>,
) -> Result<Json<WorkstationTypeResponse>, ApiError> {
    let row = workstation_types::update(&state.db, id, body).await?;
    Ok(Json(WorkstationTypeResponse::from(row)))
}

pub async fn delete_workstation_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    workstation_types::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
