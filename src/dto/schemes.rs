use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Scheme;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SchemeRequest {
    pub scheme_name: Option<String>,
    pub start_age: Option<i32>,
    pub end_age: Option<i32>,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SchemeList {
    #[schema(value_type = Vec<Scheme>)]
    pub items: Vec<Scheme>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Eligibility {
    pub scheme_id: uuid::Uuid,
    pub age: i32,
    pub eligible: bool,
}
