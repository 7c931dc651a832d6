use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::schemes::{Eligibility, SchemeList, SchemeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Scheme,
    response::ApiResponse,
    routes::params::{AgeQuery, SchemeQuery},
    services::scheme_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schemes).post(create_scheme))
        .route(
            "/{id}",
            get(get_scheme).put(update_scheme).delete(delete_scheme),
        )
        .route("/{id}/eligibility", get(check_eligibility))
}

#[utoipa::path(
    get,
    path = "/api/schemes",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("age" = Option<i32>, Query, description = "Only schemes open to this age")
    ),
    responses(
        (status = 200, description = "List schemes", body = ApiResponse<SchemeList>)
    ),
    tag = "Schemes"
)]
pub async fn list_schemes(
    State(state): State<AppState>,
    Query(query): Query<SchemeQuery>,
) -> AppResult<Json<ApiResponse<SchemeList>>> {
    let resp = scheme_service::list_schemes(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme ID")),
    responses(
        (status = 200, description = "Get scheme", body = ApiResponse<Scheme>),
        (status = 404, description = "Scheme not found")
    ),
    tag = "Schemes"
)]
pub async fn get_scheme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Scheme>>> {
    let resp = scheme_service::get_scheme(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/schemes/{id}/eligibility",
    params(
        ("id" = Uuid, Path, description = "Scheme ID"),
        ("age" = i32, Query, description = "Applicant age")
    ),
    responses(
        (status = 200, description = "Whether the age falls in the scheme's range", body = ApiResponse<Eligibility>),
        (status = 404, description = "Scheme not found")
    ),
    tag = "Schemes"
)]
pub async fn check_eligibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AgeQuery>,
) -> AppResult<Json<ApiResponse<Eligibility>>> {
    let resp = scheme_service::check_eligibility(&state, id, query.age).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/schemes",
    request_body = SchemeRequest,
    responses(
        (status = 200, description = "Create scheme", body = ApiResponse<Scheme>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Schemes"
)]
pub async fn create_scheme(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SchemeRequest>,
) -> AppResult<Json<ApiResponse<Scheme>>> {
    let resp = scheme_service::create_scheme(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme ID")),
    request_body = SchemeRequest,
    responses(
        (status = 200, description = "Updated scheme", body = ApiResponse<Scheme>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Scheme not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Schemes"
)]
pub async fn update_scheme(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SchemeRequest>,
) -> AppResult<Json<ApiResponse<Scheme>>> {
    let resp = scheme_service::update_scheme(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/schemes/{id}",
    params(("id" = Uuid, Path, description = "Scheme ID")),
    responses(
        (status = 200, description = "Deleted scheme", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Scheme not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Schemes"
)]
pub async fn delete_scheme(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = scheme_service::delete_scheme(&state, &user, id).await?;
    Ok(Json(resp))
}
