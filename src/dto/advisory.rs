use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Crop, Feedback, News, Solution, Technique};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct NewsList {
    #[schema(value_type = Vec<News>)]
    pub items: Vec<News>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTechniqueRequest {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct TechniqueList {
    #[schema(value_type = Vec<Technique>)]
    pub items: Vec<Technique>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCropRequest {
    pub name: String,
    pub description: String,
    pub climate: String,
    pub growth_period: String,
    pub harvesting_time: String,
    #[serde(default)]
    pub technique_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkTechniqueRequest {
    pub technique_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CropList {
    #[schema(value_type = Vec<Crop>)]
    pub items: Vec<Crop>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CropDetail {
    pub crop: Crop,
    pub techniques: Vec<Technique>,
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSolutionRequest {
    pub crop_id: Uuid,
    pub symptoms: String,
    pub solution: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SolutionDetail {
    /// "{symptoms} - {crop name}"
    pub title: String,
    pub solution: Solution,
    pub crop: Crop,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SolutionList {
    #[schema(value_type = Vec<Solution>)]
    pub items: Vec<Solution>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    pub content: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct FeedbackList {
    #[schema(value_type = Vec<Feedback>)]
    pub items: Vec<Feedback>,
}
