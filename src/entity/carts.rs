use sea_orm::{
    ConnectionTrait, QuerySelect,
    entity::prelude::*,
    sea_query::{Expr, Func, LockType, Query, SimpleExpr},
};

use super::cart_items;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
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

impl Related<super::farmer_products::Entity> for Entity {
    fn to() -> RelationDef {
        cart_items::Relation::FarmerProducts.def()
    }

    fn via() -> Option<RelationDef> {
        Some(cart_items::Relation::Carts.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row-locks a cart for the rest of the enclosing transaction.
///
/// `FOR NO KEY UPDATE` does not conflict with the key-share locks that
/// inserting a line item takes on its cart, so two writers adding items to
/// the same cart queue here instead of deadlocking.
pub async fn lock<C>(db: &C, cart_id: Uuid) -> Result<Option<Model>, DbErr>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(cart_id)
        .lock(LockType::NoKeyUpdate)
        .one(db)
        .await
}

/// Sets the cart total to the sum of its line item totals.
///
/// The cart row is locked first, then sum and write happen in one
/// `UPDATE ... SET total_price = (SELECT ...)` statement. Inside a
/// transaction the sum therefore sees every line item committed by earlier
/// writers of the same cart.
pub async fn update_total_price<C>(db: &C, cart_id: Uuid) -> Result<Model, DbErr>
where
    C: ConnectionTrait,
{
    lock(db, cart_id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("cart {cart_id}")))?;

    let line_sum = Query::select()
        .expr(Func::coalesce([
            Expr::col((cart_items::Entity, cart_items::Column::TotalPrice)).sum(),
            Expr::val(Decimal::ZERO).into(),
        ]))
        .from(cart_items::Entity)
        .and_where(Expr::col((cart_items::Entity, cart_items::Column::CartId)).eq(cart_id))
        .to_owned();

    let updated = Entity::update_many()
        .col_expr(
            Column::TotalPrice,
            SimpleExpr::SubQuery(None, Box::new(line_sum.into_sub_query_statement())),
        )
        .filter(Column::Id.eq(cart_id))
        .exec_with_returning(db)
        .await?;

    let cart = updated
        .into_iter()
        .next()
        .ok_or_else(|| DbErr::RecordNotFound(format!("cart {cart_id}")))?;
    tracing::debug!(cart_id = %cart.id, total = %cart.total_price, "cart total recomputed");
    Ok(cart)
}
