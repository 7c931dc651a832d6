use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::advisory::{CreateNewsRequest, NewsList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::News,
    response::ApiResponse,
    routes::params::Pagination,
    services::advisory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/{id}", get(get_news).delete(delete_news))
}

#[utoipa::path(
    get,
    path = "/api/news",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Newest news first", body = ApiResponse<NewsList>)
    ),
    tag = "News"
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<NewsList>>> {
    let resp = advisory_service::list_news(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 200, description = "Get news post", body = ApiResponse<News>),
        (status = 404, description = "Not Found")
    ),
    tag = "News"
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<News>>> {
    let resp = advisory_service::get_news(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/news",
    request_body = CreateNewsRequest,
    responses(
        (status = 200, description = "Create news post", body = ApiResponse<News>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "News"
)]
pub async fn create_news(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateNewsRequest>,
) -> AppResult<Json<ApiResponse<News>>> {
    let resp = advisory_service::create_news(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "News"
)]
pub async fn delete_news(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = advisory_service::delete_news(&state, &user, id).await?;
    Ok(Json(resp))
}
