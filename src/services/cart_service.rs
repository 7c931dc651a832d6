//! The caller's cart.
//!
//! Line item totals and the cart total are maintained by the `cart_items`
//! save hooks. This service only decides which rows to write, and does so
//! inside a transaction.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartItemDto, CartView, UpdateCartItemRequest},
    entity::{
        FarmerProducts, Users,
        cart_items::{self, ActiveModel as CartItemActive, Column as CartItemCol, Entity as CartItems},
        carts::{self, ActiveModel as CartActive, Column as CartCol, Entity as Carts},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Cart, CartItem, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let cart = get_or_create_cart(&state.orm, user.user_id).await?;
    let view = load_cart_view(&state.orm, cart).await?;
    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

/// Adds `quantity` of a product, merging with an existing line for the same
/// product.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let txn = state.orm.begin().await?;

    let product = FarmerProducts::find_by_id(payload.product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;
    if product.is_out_of_stock {
        return Err(AppError::BadRequest("product is out of stock".to_string()));
    }

    let cart = get_or_create_cart(&txn, user.user_id).await?;
    // Serializes writers of this cart so a concurrent add of the same product
    // sees the line committed before it and merges into it.
    carts::lock(&txn, cart.id).await?;

    let existing = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .filter(CartItemCol::ProductId.eq(product.id))
        .one(&txn)
        .await?;

    let item = match existing {
        Some(item) => {
            let quantity = item
                .quantity
                .checked_add(payload.quantity)
                .ok_or_else(|| AppError::BadRequest("quantity is too large".to_string()))?;
            let mut active: CartItemActive = item.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?
        }
        None => {
            CartItemActive {
                id: Set(Uuid::new_v4()),
                cart_id: Set(cart.id),
                product_id: Set(product.id),
                quantity: Set(payload.quantity),
                total_price: Set(Decimal::ZERO),
            }
            .insert(&txn)
            .await?
        }
    };

    let cart = refreshed(&txn, cart.id).await?;
    let view = load_cart_view(&txn, cart).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "cart_update",
        "cart_items",
        serde_json::json!({ "item_id": item.id, "product_id": item.product_id, "quantity": item.quantity }),
    )
    .await;

    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let txn = state.orm.begin().await?;
    let (cart, item) = find_own_item(&txn, user.user_id, item_id).await?;

    let mut active: CartItemActive = item.into();
    active.quantity = Set(payload.quantity);
    active.update(&txn).await?;

    let cart = refreshed(&txn, cart.id).await?;
    let view = load_cart_view(&txn, cart).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "cart_update",
        "cart_items",
        serde_json::json!({ "item_id": item_id, "quantity": payload.quantity }),
    )
    .await;

    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let txn = state.orm.begin().await?;
    let (cart, item) = find_own_item(&txn, user.user_id, item_id).await?;

    // Deleting through the active model runs the hook that recomputes the total.
    item.into_active_model().delete(&txn).await?;

    let cart = refreshed(&txn, cart.id).await?;
    let view = load_cart_view(&txn, cart).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "cart_remove",
        "cart_items",
        serde_json::json!({ "item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        view,
        Some(Meta::empty()),
    ))
}

/// The user's cart, created empty on first use.
///
/// `carts.user_id` is unique, so concurrent first uses insert one row and
/// every caller reads that row back.
pub async fn get_or_create_cart<C>(db: &C, user_id: Uuid) -> AppResult<carts::Model>
where
    C: ConnectionTrait,
{
    let inserted = Carts::insert(CartActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        total_price: Set(Decimal::ZERO),
    })
    .on_conflict(OnConflict::column(CartCol::UserId).do_nothing().to_owned())
    .exec_without_returning(db)
    .await?;
    if inserted > 0 {
        tracing::debug!(user_id = %user_id, "cart created");
    }

    Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}

async fn find_own_item<C>(
    db: &C,
    user_id: Uuid,
    item_id: Uuid,
) -> AppResult<(carts::Model, cart_items::Model)>
where
    C: ConnectionTrait,
{
    let (item, cart) = CartItems::find_by_id(item_id)
        .find_also_related(Carts)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    match cart {
        Some(cart) if cart.user_id == user_id => Ok((cart, item)),
        _ => Err(AppError::NotFound),
    }
}

async fn refreshed<C>(db: &C, cart_id: Uuid) -> AppResult<carts::Model>
where
    C: ConnectionTrait,
{
    Carts::find_by_id(cart_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}

async fn load_cart_view<C>(db: &C, cart: carts::Model) -> AppResult<CartView>
where
    C: ConnectionTrait,
{
    let username = Users::find_by_id(cart.user_id)
        .one(db)
        .await?
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    let rows = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .find_also_related(FarmerProducts)
        .order_by_asc(CartItemCol::Id)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for (item, product) in rows {
        let product = product.ok_or(AppError::NotFound)?;
        let label = format!(
            "{} x {} in cart for {}",
            item.quantity,
            product.crop_name.as_deref().unwrap_or(""),
            username
        );
        items.push(CartItemDto {
            item: CartItem::from(item),
            product: Product::from(product),
            label,
        });
    }

    Ok(CartView {
        label: format!("Cart for {username}"),
        cart: Cart::from(cart),
        items,
    })
}
