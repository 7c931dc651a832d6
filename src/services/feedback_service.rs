use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::advisory::{CreateFeedbackRequest, FeedbackList},
    entity::{
        Solutions, Users,
        feedback::{ActiveModel as FeedbackActive, Column as FeedbackCol, Entity as Feedback, Model as FeedbackModel},
        users::Model as UserModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation::validate_not_blank,
};

pub async fn list_feedback(
    state: &AppState,
    solution_id: Uuid,
    pagination: Pagination,
) -> AppResult<ApiResponse<FeedbackList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Feedback::find()
        .filter(FeedbackCol::SolutionId.eq(solution_id))
        .order_by_desc(FeedbackCol::DatePosted);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .find_also_related(Users)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(feedback, author)| feedback_from_entity(feedback, author.as_ref()))
        .collect();

    Ok(ApiResponse::paged(
        "Feedback",
        FeedbackList { items },
        page,
        limit,
        total,
    ))
}

pub async fn create_feedback(
    state: &AppState,
    user: &AuthUser,
    solution_id: Uuid,
    payload: CreateFeedbackRequest,
) -> AppResult<ApiResponse<models::Feedback>> {
    validate_not_blank("content", &payload.content)?;

    Solutions::find_by_id(solution_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let author = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let feedback = FeedbackActive {
        id: Set(Uuid::new_v4()),
        solution_id: Set(solution_id),
        user_id: Set(user.user_id),
        content: Set(payload.content),
        date_posted: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "feedback_create",
        "feedback",
        serde_json::json!({ "feedback_id": feedback.id, "solution_id": solution_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Feedback posted",
        feedback_from_entity(feedback, Some(&author)),
        Some(Meta::empty()),
    ))
}

fn feedback_from_entity(model: FeedbackModel, author: Option<&UserModel>) -> models::Feedback {
    models::Feedback {
        id: model.id,
        solution_id: model.solution_id,
        user_id: model.user_id,
        author: author.map(|u| u.display_name().to_string()).unwrap_or_default(),
        content: model.content,
        date_posted: model.date_posted.with_timezone(&Utc),
    }
}
