use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Cart, CartItem, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    /// Added to the line's current quantity. At least 1.
    #[schema(minimum = 1)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// New quantity of the line, at least 1. A line is emptied by deleting
    /// it, not by setting its quantity to 0.
    #[schema(minimum = 1)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub item: CartItem,
    pub product: Product,
    /// "{quantity} x {crop name} in cart for {username}"
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub cart: Cart,
    /// "Cart for {username}"
    pub label: String,
    pub items: Vec<CartItemDto>,
}
