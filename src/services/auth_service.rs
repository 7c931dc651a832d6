use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, issue_token},
    models::User,
    password,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{validate_not_blank, validate_phone},
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let username = payload.username.filter(|u| !u.trim().is_empty());
    let email = payload.email.filter(|e| !e.trim().is_empty());
    if username.is_none() && email.is_none() {
        return Err(AppError::BadRequest(
            "username or email is required".to_string(),
        ));
    }
    validate_not_blank("password", &payload.password)?;
    if let Some(phone) = payload.phone.as_deref() {
        validate_phone(phone)?;
    }

    if let Some(username) = username.as_deref() {
        if find_by_username(state, username).await?.is_some() {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }
    }
    if let Some(email) = email.as_deref() {
        if find_by_email(state, email).await?.is_some() {
            return Err(AppError::Conflict("Email is already taken".to_string()));
        }
    }

    // The users save hook replaces the plaintext with its hash.
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        user_type: Set(payload.user_type),
        username: Set(username),
        email: Set(email),
        password: Set(payload.password),
        first_name: Set(payload.first_name.unwrap_or_default()),
        last_name: Set(payload.last_name.unwrap_or_default()),
        is_active: Set(true),
        is_staff: Set(false),
        date_joined: NotSet,
        last_login: Set(None),
        phone: Set(payload.phone),
        address: Set(payload.address),
        location: Set(payload.location),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %user.id, user_type = user.user_type.as_str(), "user registered");
    audit::record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User created", User::from(user), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { login, password } = payload;
    let user = match find_by_username(state, &login).await? {
        Some(u) => Some(u),
        None => find_by_email(state, &login).await?,
    };

    let user = match user {
        Some(u) if u.is_active => u,
        _ => return Err(AppError::BadRequest("Invalid credentials".into())),
    };

    if !password::verify_password(&password, &user.password) {
        return Err(AppError::BadRequest("Invalid credentials".into()));
    }

    let token = issue_token(user.id, user.user_type, user.is_staff)?;

    let user_id = user.id;
    let mut active: UserActive = user.into();
    active.last_login = Set(Some(Utc::now().into()));
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user_id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", User::from(model), None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone {
        validate_phone(&phone)?;
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(raw) = payload.password {
        validate_not_blank("password", &raw)?;
        active.password = Set(raw);
    }

    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        updated.id,
        "profile_update",
        "users",
        serde_json::json!({ "user_id": updated.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", User::from(updated), None))
}

async fn find_by_username(state: &AppState, username: &str) -> AppResult<Option<UserModel>> {
    Ok(Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?)
}

async fn find_by_email(state: &AppState, email: &str) -> AppResult<Option<UserModel>> {
    Ok(Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?)
}
