use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::dto::{CreateDepartment, DepartmentResponse, ListQuery, UpdateDepartment};
use crate::store::{self, departments};

use super::{ApiError, AppState};

pub async fn list_departments(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(store::DEFAULT_LIMIT);

    let rows = departments::list(&state.db, skip, limit).await?;
    Ok(Json(rows.into_iter().map(DepartmentResponse::from).collect()))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let row = departments::get(&state.db, id).await?;
    Ok(Json(DepartmentResponse::from(row)))
}

pub async fn create_department(
    State(state): State<AppState>,
    Json(body): Json<CreateDepartment>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let row = departments::create(&state.db, body).await?;
    Ok(Json(DepartmentResponse::from(row)))
}

pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateDepartment>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let row = departments::update(&state.db, id, body).await?;
    Ok(Json(DepartmentResponse::from(row)))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    departments::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
