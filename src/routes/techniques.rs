use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::advisory::{CreateTechniqueRequest, TechniqueList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Technique,
    response::ApiResponse,
    routes::params::{Pagination, UploadQuery},
    services::advisory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_techniques).post(create_technique))
        .route("/{id}", get(get_technique).delete(delete_technique))
        .route("/{id}/image", post(upload_image))
}

#[utoipa::path(
    get,
    path = "/api/techniques",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List techniques", body = ApiResponse<TechniqueList>)
    ),
    tag = "Techniques"
)]
pub async fn list_techniques(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<TechniqueList>>> {
    let resp = advisory_service::list_techniques(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/techniques/{id}",
    params(("id" = Uuid, Path, description = "Technique ID")),
    responses(
        (status = 200, description = "Get technique", body = ApiResponse<Technique>),
        (status = 404, description = "Not Found")
    ),
    tag = "Techniques"
)]
pub async fn get_technique(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Technique>>> {
    let resp = advisory_service::get_technique(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/techniques",
    request_body = CreateTechniqueRequest,
    responses(
        (status = 200, description = "Create technique", body = ApiResponse<Technique>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Techniques"
)]
pub async fn create_technique(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTechniqueRequest>,
) -> AppResult<Json<ApiResponse<Technique>>> {
    let resp = advisory_service::create_technique(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/techniques/{id}/image",
    params(
        ("id" = Uuid, Path, description = "Technique ID"),
        ("filename" = String, Query, description = "Original file name")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image stored under technique_images/", body = ApiResponse<Technique>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Techniques"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<Technique>>> {
    let resp =
        advisory_service::upload_technique_image(&state, &user, id, &query.filename, &body).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/techniques/{id}",
    params(("id" = Uuid, Path, description = "Technique ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Techniques"
)]
pub async fn delete_technique(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = advisory_service::delete_technique(&state, &user, id).await?;
    Ok(Json(resp))
}
