//! News, agricultural techniques, crops and crop solutions.
//!
//! Reads are public; every write requires a staff account.

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::advisory::{
        CreateCropRequest, CreateNewsRequest, CreateSolutionRequest, CreateTechniqueRequest,
        CropDetail, CropList, LinkTechniqueRequest, NewsList, SolutionDetail, SolutionList,
        TechniqueList,
    },
    entity::{
        agricultural_techniques::{
            self, ActiveModel as TechniqueActive, Column as TechniqueCol, Model as TechniqueModel,
        },
        crop_techniques::{self, ActiveModel as CropTechniqueActive},
        crops::{self, ActiveModel as CropActive, Column as CropCol},
        news::{self, ActiveModel as NewsActive, Column as NewsCol},
        solutions::{self, ActiveModel as SolutionActive, Column as SolutionCol},
        Crops, News, Solutions, Techniques,
    },
    error::{AppError, AppResult},
    media,
    middleware::auth::{AuthUser, ensure_staff},
    models::{Crop, Solution, Technique},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, SolutionQuery},
    state::AppState,
    validation::validate_not_blank,
};

// News

pub async fn list_news(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<NewsList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = News::find().order_by_desc(NewsCol::DatePosted);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(crate::models::News::from)
        .collect();
    Ok(ApiResponse::paged("News", NewsList { items }, page, limit, total))
}

pub async fn get_news(state: &AppState, id: Uuid) -> AppResult<ApiResponse<crate::models::News>> {
    let post = News::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(post.title.clone(), post.into(), None))
}

pub async fn create_news(
    state: &AppState,
    user: &AuthUser,
    payload: CreateNewsRequest,
) -> AppResult<ApiResponse<crate::models::News>> {
    ensure_staff(user)?;
    validate_not_blank("title", &payload.title)?;
    let post = NewsActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        content: Set(payload.content),
        date_posted: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "news_create",
        "news",
        serde_json::json!({ "news_id": post.id }),
    )
    .await;

    Ok(ApiResponse::success("News created", post.into(), Some(Meta::empty())))
}

pub async fn delete_news(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = news::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.pool,
        user.user_id,
        "news_delete",
        "news",
        serde_json::json!({ "news_id": id }),
    )
    .await;
    Ok(deleted())
}

// Techniques

pub async fn list_techniques(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<TechniqueList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Techniques::find().order_by_asc(TechniqueCol::Title);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Technique::from)
        .collect();
    Ok(ApiResponse::paged(
        "Techniques",
        TechniqueList { items },
        page,
        limit,
        total,
    ))
}

pub async fn get_technique(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Technique>> {
    let technique = find_technique(state, id).await?;
    Ok(ApiResponse::success(
        technique.title.clone(),
        technique.into(),
        None,
    ))
}

pub async fn create_technique(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTechniqueRequest,
) -> AppResult<ApiResponse<Technique>> {
    ensure_staff(user)?;
    validate_not_blank("title", &payload.title)?;
    let technique = TechniqueActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        image: Set(None),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "technique_create",
        "agricultural_techniques",
        serde_json::json!({ "technique_id": technique.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Technique created",
        technique.into(),
        Some(Meta::empty()),
    ))
}

pub async fn upload_technique_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    filename: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<Technique>> {
    ensure_staff(user)?;
    let technique = find_technique(state, id).await?;
    let previous = technique.image.clone();

    let path = media::store_upload(&state.media_root, media::TECHNIQUE_IMAGES, filename, bytes).await?;
    let mut active: TechniqueActive = technique.into();
    active.image = Set(Some(path));
    let technique = active.update(&state.orm).await?;

    if let Some(previous) = previous {
        media::remove_upload(&state.media_root, &previous).await;
    }

    Ok(ApiResponse::success(
        "Image uploaded",
        technique.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_technique(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let technique = find_technique(state, id).await?;
    let image = technique.image.clone();
    technique.delete(&state.orm).await?;

    if let Some(image) = image {
        media::remove_upload(&state.media_root, &image).await;
    }
    audit::record(
        &state.pool,
        user.user_id,
        "technique_delete",
        "agricultural_techniques",
        serde_json::json!({ "technique_id": id }),
    )
    .await;
    Ok(deleted())
}

// Crops

pub async fn list_crops(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CropList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Crops::find().order_by_asc(CropCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Crop::from)
        .collect();
    Ok(ApiResponse::paged("Crops", CropList { items }, page, limit, total))
}

pub async fn get_crop(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CropDetail>> {
    let crop = Crops::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let techniques = crop
        .find_related(Techniques)
        .order_by_asc(TechniqueCol::Title)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Technique::from)
        .collect();
    let solutions = crop
        .find_related(Solutions)
        .order_by_asc(SolutionCol::Symptoms)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Solution::from)
        .collect();

    let data = CropDetail {
        crop: crop.into(),
        techniques,
        solutions,
    };
    Ok(ApiResponse::success("Crop", data, Some(Meta::empty())))
}

pub async fn create_crop(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCropRequest,
) -> AppResult<ApiResponse<CropDetail>> {
    ensure_staff(user)?;
    validate_not_blank("name", &payload.name)?;

    let txn = state.orm.begin().await?;

    let crop = CropActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        climate: Set(payload.climate),
        growth_period: Set(payload.growth_period),
        harvesting_time: Set(payload.harvesting_time),
    }
    .insert(&txn)
    .await?;

    for technique_id in &payload.technique_ids {
        link(&txn, crop.id, *technique_id).await?;
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "crop_create",
        "crops",
        serde_json::json!({ "crop_id": crop.id, "technique_ids": payload.technique_ids }),
    )
    .await;

    get_crop(state, crop.id).await
}

pub async fn link_technique(
    state: &AppState,
    user: &AuthUser,
    crop_id: Uuid,
    payload: LinkTechniqueRequest,
) -> AppResult<ApiResponse<CropDetail>> {
    ensure_staff(user)?;
    Crops::find_by_id(crop_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    link(&state.orm, crop_id, payload.technique_id).await?;
    get_crop(state, crop_id).await
}

pub async fn delete_crop(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = crops::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.pool,
        user.user_id,
        "crop_delete",
        "crops",
        serde_json::json!({ "crop_id": id }),
    )
    .await;
    Ok(deleted())
}

/// Idempotent: linking an already linked technique is a no-op.
async fn link<C>(db: &C, crop_id: Uuid, technique_id: Uuid) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let exists = agricultural_techniques::Entity::find_by_id(technique_id)
        .one(db)
        .await?
        .is_some();
    if !exists {
        return Err(AppError::BadRequest(format!(
            "technique {technique_id} not found"
        )));
    }

    crop_techniques::Entity::insert(CropTechniqueActive {
        crop_id: Set(crop_id),
        technique_id: Set(technique_id),
    })
    .on_conflict(
        OnConflict::columns([
            crop_techniques::Column::CropId,
            crop_techniques::Column::TechniqueId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(())
}

// Solutions

pub async fn list_solutions(
    state: &AppState,
    query: SolutionQuery,
) -> AppResult<ApiResponse<SolutionList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(crop_id) = query.crop_id {
        condition = condition.add(SolutionCol::CropId.eq(crop_id));
    }

    let finder = Solutions::find()
        .filter(condition)
        .order_by_asc(SolutionCol::Symptoms);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Solution::from)
        .collect();
    Ok(ApiResponse::paged(
        "Solutions",
        SolutionList { items },
        page,
        limit,
        total,
    ))
}

pub async fn get_solution(state: &AppState, id: Uuid) -> AppResult<ApiResponse<SolutionDetail>> {
    let (solution, crop) = solutions::Entity::find_by_id(id)
        .find_also_related(Crops)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let crop = crop.ok_or(AppError::NotFound)?;

    let data = SolutionDetail {
        title: solution.display_name(&crop.name),
        solution: solution.into(),
        crop: crop.into(),
    };
    Ok(ApiResponse::success("Solution", data, Some(Meta::empty())))
}

pub async fn create_solution(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSolutionRequest,
) -> AppResult<ApiResponse<SolutionDetail>> {
    ensure_staff(user)?;
    validate_not_blank("symptoms", &payload.symptoms)?;
    Crops::find_by_id(payload.crop_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest("crop not found".to_string()))?;

    let solution = SolutionActive {
        id: Set(Uuid::new_v4()),
        crop_id: Set(payload.crop_id),
        symptoms: Set(payload.symptoms),
        solution: Set(payload.solution),
        description: Set(payload.description),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "solution_create",
        "solutions",
        serde_json::json!({ "solution_id": solution.id, "crop_id": solution.crop_id }),
    )
    .await;

    get_solution(state, solution.id).await
}

pub async fn delete_solution(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Solutions::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.pool,
        user.user_id,
        "solution_delete",
        "solutions",
        serde_json::json!({ "solution_id": id }),
    )
    .await;
    Ok(deleted())
}

async fn find_technique(state: &AppState, id: Uuid) -> AppResult<TechniqueModel> {
    Techniques::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

fn deleted() -> ApiResponse<serde_json::Value> {
    ApiResponse::success("Deleted", serde_json::json!({}), Some(Meta::empty()))
}
