use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        CartItems, carts,
        cart_items::Column as CartItemCol,
        farmer_products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    media,
    middleware::auth::{AuthUser, ensure_farmer},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
    validation::validate_non_negative,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(Column::CropName).ilike(pattern));
    }
    if let Some(crop_type) = query.crop_type {
        condition = condition.add(Column::CropType.eq(crop_type));
    }
    if let Some(in_stock) = query.in_stock {
        condition = condition.add(Column::IsOutOfStock.eq(!in_stock));
    }
    if let Some(posted_by) = query.posted_by {
        condition = condition.add(Column::PostedBy.eq(posted_by));
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::CropName => Column::CropName,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let data = ProductList { items };
    Ok(ApiResponse::paged("Products", data, page, limit, total))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_farmer(user)?;
    validate_amounts(payload.price, payload.quantity)?;

    // is_out_of_stock is derived from quantity by the save hook.
    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        posted_by: Set(Some(user.user_id)),
        crop_type: Set(payload.crop_type),
        crop_name: Set(payload.crop_name),
        image: Set(None),
        price: Set(payload.price),
        quantity: Set(payload.quantity),
        description: Set(payload.description),
        is_out_of_stock: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, out_of_stock = product.is_out_of_stock, "product posted");
    audit::record(
        &state.pool,
        user.user_id,
        "product_create",
        "farmer_products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = find_owned_product(state, user, id).await?;
    validate_amounts(payload.price, payload.quantity)?;

    let mut active: ActiveModel = existing.into();
    if let Some(crop_type) = payload.crop_type {
        active.crop_type = Set(crop_type);
    }
    if let Some(crop_name) = payload.crop_name {
        active.crop_name = Set(Some(crop_name));
    }
    if let Some(price) = payload.price {
        active.price = Set(Some(price));
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(Some(quantity));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_update",
        "farmer_products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn upload_product_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    filename: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<Product>> {
    let existing = find_owned_product(state, user, id).await?;
    let previous = existing.image.clone();

    let path = media::store_upload(&state.media_root, media::PRODUCT_IMAGES, filename, bytes).await?;
    let mut active: ActiveModel = existing.into();
    active.image = Set(Some(path));
    let product = active.update(&state.orm).await?;

    if let Some(previous) = previous {
        media::remove_upload(&state.media_root, &previous).await;
    }

    Ok(ApiResponse::success(
        "Image uploaded",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = find_owned_product(state, user, id).await?;
    let image = existing.image.clone();

    // Cart lines go with the product through the foreign key, which bypasses
    // the cart item hooks, so the affected carts are recomputed here.
    let txn = state.orm.begin().await?;
    let cart_ids: Vec<Uuid> = CartItems::find()
        .select_only()
        .column(CartItemCol::CartId)
        .filter(CartItemCol::ProductId.eq(id))
        .distinct()
        .into_tuple()
        .all(&txn)
        .await?;
    existing.delete(&txn).await?;
    for &cart_id in &cart_ids {
        carts::update_total_price(&txn, cart_id).await?;
    }
    txn.commit().await?;

    if let Some(image) = image {
        media::remove_upload(&state.media_root, &image).await;
    }

    audit::record(
        &state.pool,
        user.user_id,
        "product_delete",
        "farmer_products",
        serde_json::json!({ "product_id": id, "carts_updated": cart_ids.len() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_product(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// Only the farmer who posted a product may change it.
async fn find_owned_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ProductModel> {
    ensure_farmer(user)?;
    let product = find_product(state, id).await?;
    if product.posted_by != Some(user.user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(product)
}

fn validate_amounts(price: Option<f64>, quantity: Option<i32>) -> AppResult<()> {
    if let Some(price) = price {
        validate_non_negative("price", price)?;
    }
    if let Some(quantity) = quantity {
        validate_non_negative("quantity", quantity as f64)?;
    }
    Ok(())
}
