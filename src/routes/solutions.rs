use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::advisory::{
        CreateFeedbackRequest, CreateSolutionRequest, FeedbackList, SolutionDetail, SolutionList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Feedback,
    response::ApiResponse,
    routes::params::{Pagination, SolutionQuery},
    services::{advisory_service, feedback_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_solutions).post(create_solution))
        .route("/{id}", get(get_solution).delete(delete_solution))
        .route("/{id}/feedback", get(list_feedback).post(create_feedback))
}

#[utoipa::path(
    get,
    path = "/api/solutions",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("crop_id" = Option<Uuid>, Query, description = "Only solutions for this crop")
    ),
    responses(
        (status = 200, description = "List solutions", body = ApiResponse<SolutionList>)
    ),
    tag = "Solutions"
)]
pub async fn list_solutions(
    State(state): State<AppState>,
    Query(query): Query<SolutionQuery>,
) -> AppResult<Json<ApiResponse<SolutionList>>> {
    let resp = advisory_service::list_solutions(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/solutions/{id}",
    params(("id" = Uuid, Path, description = "Solution ID")),
    responses(
        (status = 200, description = "Solution with its crop", body = ApiResponse<SolutionDetail>),
        (status = 404, description = "Not Found")
    ),
    tag = "Solutions"
)]
pub async fn get_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SolutionDetail>>> {
    let resp = advisory_service::get_solution(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/solutions",
    request_body = CreateSolutionRequest,
    responses(
        (status = 200, description = "Create solution", body = ApiResponse<SolutionDetail>),
        (status = 400, description = "Crop not found"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Solutions"
)]
pub async fn create_solution(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSolutionRequest>,
) -> AppResult<Json<ApiResponse<SolutionDetail>>> {
    let resp = advisory_service::create_solution(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/solutions/{id}",
    params(("id" = Uuid, Path, description = "Solution ID")),
    responses(
        (status = 200, description = "Deleted with its feedback", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Solutions"
)]
pub async fn delete_solution(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = advisory_service::delete_solution(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/solutions/{id}/feedback",
    params(
        ("id" = Uuid, Path, description = "Solution ID"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Feedback on a solution, newest first", body = ApiResponse<FeedbackList>)
    ),
    tag = "Feedback"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FeedbackList>>> {
    let resp = feedback_service::list_feedback(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/solutions/{id}/feedback",
    params(("id" = Uuid, Path, description = "Solution ID")),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback posted", body = ApiResponse<Feedback>),
        (status = 404, description = "Solution not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<Json<ApiResponse<Feedback>>> {
    let resp = feedback_service::create_feedback(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
