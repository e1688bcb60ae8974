use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::Utc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use content_core::{AppError, ContentService};
use content_db::ContentRepository;

use crate::config::normalize_prefix;
use crate::dto::{
    ContentCollection, ContentEnvelope, CreateContentRequest, HealthResponse, ListContentsQuery,
    UpdateContentRequest,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// The unprefixed content route table: `/health`, `/contents`, `/contents/{id}`.
pub fn content_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/contents", get(list_contents).post(create_content))
        .route(
            "/contents/{id}",
            get(show_content)
                .put(update_content)
                .patch(update_content)
                .delete(delete_content),
        )
}

/// Build the full router: content routes mounted under `prefix`, plus API docs.
pub fn router(state: Arc<AppState>, prefix: &str) -> Router {
    let prefix = normalize_prefix(prefix);
    let module = if prefix.is_empty() {
        content_routes()
    } else {
        Router::new().nest(&prefix, content_routes())
    };

    module
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

fn service(state: &AppState) -> ContentService<ContentRepository> {
    ContentService::new(state.db.content_repo())
}

/// Ids that are not integers cannot match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(AppError::NotFound(raw.to_string())))
}

// ---------------------------------------------------------------------------
// Contents
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/contents",
    params(ListContentsQuery),
    responses(
        (status = 200, description = "Paginated contents", body = ContentCollection),
    ),
    tag = "contents"
)]
pub async fn list_contents(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListContentsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = service(&state).list(query.page_request()).await?;

    Ok(axum::Json(ContentCollection::from_page(page, uri.path())))
}

#[utoipa::path(
    post,
    path = "/contents",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentEnvelope),
        (status = 400, description = "Body is not JSON", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
    ),
    tag = "contents"
)]
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    payload: Result<axum::Json<CreateContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = payload?;
    let content = service(&state).create(body.into()).await?;

    Ok((StatusCode::CREATED, axum::Json(ContentEnvelope::from(content))))
}

#[utoipa::path(
    get,
    path = "/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content details", body = ContentEnvelope),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "contents"
)]
pub async fn show_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let content = service(&state).show(id).await?;

    Ok(axum::Json(ContentEnvelope::from(content)))
}

#[utoipa::path(
    put,
    path = "/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content ID")
    ),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentEnvelope),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
    ),
    tag = "contents"
)]
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<axum::Json<UpdateContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let axum::Json(body) = payload?;
    let content = service(&state).update(id, body.into()).await?;

    Ok(axum::Json(ContentEnvelope::from(content)))
}

#[utoipa::path(
    delete,
    path = "/contents/{id}",
    params(
        ("id" = i64, Path, description = "Content ID")
    ),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "contents"
)]
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    service(&state).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Module is loaded", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.db.content_repo().health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "disconnected"
        }
    };

    axum::Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        database,
    })
}
