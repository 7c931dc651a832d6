use sea_orm::{ActiveValue, ConnectionTrait, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{password, validation};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum UserType {
    #[sea_orm(string_value = "Farmer")]
    Farmer,
    #[sea_orm(string_value = "User")]
    User,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Farmer => "Farmer",
            UserType::User => "User",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_type: UserType,
    #[sea_orm(unique)]
    pub username: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// Always a hashed form once persisted, see [`password::is_hashed`].
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTimeWithTimeZone,
    pub last_login: Option<DateTimeWithTimeZone>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
}

impl Model {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schemes::Entity")]
    Schemes,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
    #[sea_orm(has_many = "super::farmer_products::Entity")]
    FarmerProducts,
    #[sea_orm(has_many = "super::carts::Entity")]
    Carts,
}

impl Related<super::schemes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schemes.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<super::farmer_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmerProducts.def()
    }
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Carts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(Some(phone)) = &self.phone {
            validation::validate_phone(phone).map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        let hashed = match &self.password {
            ActiveValue::Set(raw) => {
                password::hash_if_needed(raw).map_err(|e| DbErr::Custom(e.to_string()))?
            }
            _ => None,
        };
        if let Some(hashed) = hashed {
            self.password = Set(hashed);
        }

        Ok(self)
    }
}
