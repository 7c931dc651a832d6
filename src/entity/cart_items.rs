use rust_decimal::prelude::FromPrimitive;
use sea_orm::{ActiveValue, ConnectionTrait, entity::prelude::*};

use super::{carts, farmer_products, value_of};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_price: Decimal,
}

/// `price * quantity`, rounded to cents.
pub fn line_total(price: f64, quantity: i32) -> Result<Decimal, DbErr> {
    let unit = Decimal::from_f64(price)
        .ok_or_else(|| DbErr::Custom(format!("product price {price} is not a valid amount")))?;
    unit.checked_mul(Decimal::from(quantity))
        .map(|total| total.round_dp(2))
        .ok_or_else(|| DbErr::Custom("cart item total is out of range".to_string()))
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::carts::Entity",
        from = "Column::CartId",
        to = "super::carts::Column::Id",
        on_delete = "Cascade"
    )]
    Carts,
    #[sea_orm(
        belongs_to = "super::farmer_products::Entity",
        from = "Column::ProductId",
        to = "super::farmer_products::Column::Id",
        on_delete = "Cascade"
    )]
    FarmerProducts,
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Carts.def()
    }
}

impl Related<super::farmer_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmerProducts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut product_id = value_of(&self.product_id).copied();
        let mut quantity = value_of(&self.quantity).copied();

        // The total is always priced from the row's real product and
        // quantity, so a partial update fills the gaps from the stored row.
        if !insert && (product_id.is_none() || quantity.is_none()) {
            if let Some(id) = value_of(&self.id) {
                let stored = Entity::find_by_id(*id)
                    .one(db)
                    .await?
                    .ok_or_else(|| DbErr::RecordNotFound(format!("cart item {id}")))?;
                product_id.get_or_insert(stored.product_id);
                quantity.get_or_insert(stored.quantity);
            }
        }

        let product_id =
            product_id.ok_or_else(|| DbErr::Custom("cart item has no product".to_string()))?;
        let quantity =
            quantity.ok_or_else(|| DbErr::Custom("cart item has no quantity".to_string()))?;

        let product = farmer_products::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("product {product_id}")))?;
        let price = product
            .price
            .ok_or_else(|| DbErr::Custom("product has no price".to_string()))?;

        self.total_price = ActiveValue::Set(line_total(price, quantity)?);
        Ok(self)
    }

    async fn after_save<C>(model: Model, db: &C, _insert: bool) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        carts::update_total_price(db, model.cart_id).await?;
        Ok(model)
    }

    async fn after_delete<C>(self, db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(cart_id) = value_of(&self.cart_id) {
            carts::update_total_price(db, *cart_id).await?;
        }
        Ok(self)
    }
}
