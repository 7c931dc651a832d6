use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::users::UserType;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub user_type: UserType,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
}

/// `login` is matched against username first, then email.
#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub user_type: UserType,
    pub is_staff: bool,
    pub exp: usize,
}
