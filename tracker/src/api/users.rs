use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::dto::{CreateUser, ListQuery, UpdateUser, UserResponse};
use crate::store::{self, users};

use super::{ApiError, AppState};

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(store::DEFAULT_LIMIT);

    let rows = users::list(&state.db, skip, limit).await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let row = users::get(&state.db, id).await?;
    Ok(Json(UserResponse::from(row)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let row = users::create(&state.db, body).await?;
    Ok(Json(UserResponse::from(row)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let row = users::update(&state.db, id, body).await?;
    Ok(Json(UserResponse::from(row)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    users::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, app_router};
    use crate::config::AppConfig;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use migration::MigratorTrait as _;
    use sea_orm::Database;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn make_app() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        app_router(AppState {
            db,
            config: Arc::new(AppConfig::default()),
        })
    }

    fn json_request(method: Method, uri: &str, value: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_department(app: &Router) -> i64 {
        let res = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/departments",
                serde_json::json!({"name": "IT"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        body_json(res).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_fills_defaults() {
        let app = make_app().await;
        let dept_id = seed_department(&app).await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "distinguished_name": "a123z",
                    "name": "Alice",
                    "department_id": dept_id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let user = body_json(res).await;
        assert_eq!(user["status"], 1);
        assert!(user["date_of_arrival"].is_string());
        assert!(user["date_of_leave"].is_null());
    }

    #[tokio::test]
    async fn create_without_department_is_unprocessable() {
        let app = make_app().await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "distinguished_name": "a123z",
                    "name": "Alice",
                    "department_id": 99
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn invalid_date_of_leave_is_unprocessable() {
        let app = make_app().await;
        let dept_id = seed_department(&app).await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "distinguished_name": "a123z",
                    "name": "Alice",
                    "department_id": dept_id,
                    "date_of_leave": "2024-13-01"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn out_of_range_status_is_unprocessable() {
        let app = make_app().await;
        let dept_id = seed_department(&app).await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "distinguished_name": "a123z",
                    "name": "Alice",
                    "department_id": dept_id,
                    "status": 5
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn patch_merges_partial_fields() {
        let app = make_app().await;
        let dept_id = seed_department(&app).await;

        let res = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "distinguished_name": "a123z",
                    "name": "Alice",
                    "department_id": dept_id,
                    "office_location": "B2"
                }),
            ))
            .await
            .unwrap();
        let user = body_json(res).await;
        let id = user["id"].as_i64().unwrap();

        let res = app
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                &format!("/api/v1/users/{id}"),
                serde_json::json!({"status": 2, "date_of_leave": "2026-12-31"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let updated = body_json(res).await;
        assert_eq!(updated["status"], 2);
        assert_eq!(updated["date_of_leave"], "2026-12-31");
        // Untouched fields keep their prior values.
        assert_eq!(updated["name"], "Alice");
        assert_eq!(updated["office_location"], "B2");
        assert_eq!(updated["department_id"], user["department_id"]);
    }

    #[tokio::test]
    async fn patch_missing_user_is_not_found() {
        let app = make_app().await;

        let res = app
            .oneshot(json_request(
                Method::PATCH,
                "/api/v1/users/42",
                serde_json::json!({"name": "Nobody"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(res).await,
            serde_json::json!({"detail": "User not found"})
        );
    }
}
