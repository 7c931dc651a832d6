use sea_orm::{ActiveValue, ConnectionTrait, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::value_of;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(200))")]
pub enum CropType {
    #[default]
    #[sea_orm(string_value = "Vegetables")]
    Vegetables,
    #[sea_orm(string_value = "Fruits")]
    Fruits,
    #[sea_orm(string_value = "Grains")]
    Grains,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "farmer_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub posted_by: Option<Uuid>,
    pub crop_type: CropType,
    pub crop_name: Option<String>,
    /// Path relative to the media root, under `product_images/`.
    pub image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_out_of_stock: bool,
    pub created_at: DateTimeWithTimeZone,
}

/// Stock flag after a save: zero means out of stock, positive means in
/// stock. Negative or unknown quantities keep the current flag.
pub fn derive_out_of_stock(quantity: Option<i32>, current: bool) -> bool {
    match quantity {
        Some(0) => true,
        Some(q) if q > 0 => false,
        _ => current,
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PostedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut quantity = value_of(&self.quantity).copied();
        let mut current = value_of(&self.is_out_of_stock).copied();

        // Partial updates carry only the changed columns; the rest comes from
        // the stored row.
        if !insert && (quantity.is_none() || current.is_none()) {
            if let Some(id) = value_of(&self.id) {
                if let Some(stored) = Entity::find_by_id(*id).one(db).await? {
                    quantity.get_or_insert(stored.quantity);
                    current.get_or_insert(stored.is_out_of_stock);
                }
            }
        }

        let known = current.unwrap_or(false);
        let derived = derive_out_of_stock(quantity.flatten(), known);
        if current.is_none() || derived != known {
            self.is_out_of_stock = ActiveValue::Set(derived);
        }
        Ok(self)
    }
}
