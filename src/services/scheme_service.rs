use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::schemes::{Eligibility, SchemeList, SchemeRequest},
    entity::schemes::{ActiveModel, Column, Entity as Schemes, Model as SchemeModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Scheme,
    response::{ApiResponse, Meta},
    routes::params::SchemeQuery,
    state::AppState,
};

pub async fn list_schemes(
    state: &AppState,
    query: SchemeQuery,
) -> AppResult<ApiResponse<SchemeList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    // Same rule as `Model::contains_age`, pushed down to SQL.
    if let Some(age) = query.age {
        condition = condition
            .add(Column::StartAge.lte(age))
            .add(Column::EndAge.gte(age));
    }

    let finder = Schemes::find()
        .filter(condition)
        .order_by_desc(Column::Timestamp);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Scheme::from)
        .collect();

    Ok(ApiResponse::paged(
        "Schemes",
        SchemeList { items },
        page,
        limit,
        total,
    ))
}

pub async fn get_scheme(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Scheme>> {
    let scheme = find_scheme(state, id).await?;
    Ok(ApiResponse::success("Scheme", Scheme::from(scheme), None))
}

pub async fn check_eligibility(
    state: &AppState,
    id: Uuid,
    age: i32,
) -> AppResult<ApiResponse<Eligibility>> {
    let scheme = find_scheme(state, id).await?;
    let data = Eligibility {
        scheme_id: scheme.id,
        age,
        eligible: scheme.contains_age(age),
    };
    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn create_scheme(
    state: &AppState,
    user: &AuthUser,
    payload: SchemeRequest,
) -> AppResult<ApiResponse<Scheme>> {
    ensure_staff(user)?;
    let scheme = ActiveModel {
        id: Set(Uuid::new_v4()),
        created_by: Set(Some(user.user_id)),
        scheme_name: Set(payload.scheme_name),
        start_age: Set(payload.start_age),
        end_age: Set(payload.end_age),
        description: Set(payload.description),
        link: Set(payload.link),
        timestamp: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "scheme_create",
        "schemes",
        serde_json::json!({ "scheme_id": scheme.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Scheme created",
        Scheme::from(scheme),
        Some(Meta::empty()),
    ))
}

pub async fn update_scheme(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SchemeRequest,
) -> AppResult<ApiResponse<Scheme>> {
    ensure_staff(user)?;
    let existing = find_scheme(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if payload.scheme_name.is_some() {
        active.scheme_name = Set(payload.scheme_name);
    }
    if payload.start_age.is_some() {
        active.start_age = Set(payload.start_age);
    }
    if payload.end_age.is_some() {
        active.end_age = Set(payload.end_age);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if payload.link.is_some() {
        active.link = Set(payload.link);
    }
    let scheme = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "scheme_update",
        "schemes",
        serde_json::json!({ "scheme_id": scheme.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Scheme::from(scheme),
        Some(Meta::empty()),
    ))
}

pub async fn delete_scheme(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Schemes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "scheme_delete",
        "schemes",
        serde_json::json!({ "scheme_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_scheme(state: &AppState, id: Uuid) -> AppResult<SchemeModel> {
    Schemes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}
