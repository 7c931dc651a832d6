use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::advisory::{CreateCropRequest, CropDetail, CropList, LinkTechniqueRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::advisory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crops).post(create_crop))
        .route("/{id}", get(get_crop).delete(delete_crop))
        .route("/{id}/techniques", post(link_technique))
}

#[utoipa::path(
    get,
    path = "/api/crops",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List crops", body = ApiResponse<CropList>)
    ),
    tag = "Crops"
)]
pub async fn list_crops(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CropList>>> {
    let resp = advisory_service::list_crops(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/crops/{id}",
    params(("id" = Uuid, Path, description = "Crop ID")),
    responses(
        (status = 200, description = "Crop with its techniques and solutions", body = ApiResponse<CropDetail>),
        (status = 404, description = "Not Found")
    ),
    tag = "Crops"
)]
pub async fn get_crop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CropDetail>>> {
    let resp = advisory_service::get_crop(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/crops",
    request_body = CreateCropRequest,
    responses(
        (status = 200, description = "Create crop", body = ApiResponse<CropDetail>),
        (status = 400, description = "Unknown technique"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
pub async fn create_crop(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCropRequest>,
) -> AppResult<Json<ApiResponse<CropDetail>>> {
    let resp = advisory_service::create_crop(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/crops/{id}/techniques",
    params(("id" = Uuid, Path, description = "Crop ID")),
    request_body = LinkTechniqueRequest,
    responses(
        (status = 200, description = "Technique linked", body = ApiResponse<CropDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
pub async fn link_technique(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkTechniqueRequest>,
) -> AppResult<Json<ApiResponse<CropDetail>>> {
    let resp = advisory_service::link_technique(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/crops/{id}",
    params(("id" = Uuid, Path, description = "Crop ID")),
    responses(
        (status = 200, description = "Deleted with its solutions", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Crops"
)]
pub async fn delete_crop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = advisory_service::delete_crop(&state, &user, id).await?;
    Ok(Json(resp))
}
