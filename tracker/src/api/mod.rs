use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::config::AppConfig;
use crate::store::StoreError;

pub mod departments;
pub mod users;
pub mod workstation_types;
pub mod workstations;

// ---------- shared state ----------

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

// ---------- error type ----------

/// A JSON error response: `{"detail": "..."}` with an HTTP status.
pub struct ApiError(StatusCode, String);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(kind) => {
                Self(StatusCode::NOT_FOUND, format!("{kind} not found"))
            }
            StoreError::Conflict(msg) => Self(StatusCode::CONFLICT, msg),
            StoreError::MissingReference(msg) | StoreError::Validation(msg) => {
                Self(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            StoreError::Db(e) => {
                // The detail goes to the log, never to the client.
                tracing::error!(error = %e, "datastore error");
                Self(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.1 });
        (self.0, Json(body)).into_response()
    }
}

// ---------- router ----------

pub fn app_router(state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = state
        .config
        .api
        .cors_allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new() // no origins allowed = same-origin only
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { StatusCode::OK }))
        .nest(&state.config.api.prefix, api_v1())
        .layer(cors)
        .layer(NormalizePathLayer::trim_trailing_slash())
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to the {} API", state.config.api.project_name),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
    }))
}

fn api_v1() -> Router<AppState> {
    Router::new()
        // departments
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(departments::get_department)
                .patch(departments::update_department)
                .delete(departments::delete_department),
        )
        // users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // workstation types
        .route(
            "/workstation-types",
            get(workstation_types::list_workstation_types)
                .post(workstation_types::create_workstation_type),
        )
        .route(
            "/workstation-types/{id}",
            get(workstation_types::get_workstation_type)
                .patch(workstation_types::update_workstation_type)
                .delete(workstation_types::delete_workstation_type),
        )
        // workstations
        .route(
            "/workstations",
            get(workstations::list_workstations).post(workstations::create_workstation),
        )
        .route(
            "/workstations/{id}",
            get(workstations::get_workstation)
                .patch(workstations::update_workstation)
                .delete(workstations::delete_workstation),
        )
}
