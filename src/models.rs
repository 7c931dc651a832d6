use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    agricultural_techniques, cart_items, carts, crops, farmer_products::{self, CropType}, news,
    schemes, solutions, users::{self, UserType},
};

/// Public view of an account; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub user_type: UserType,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            user_type: model.user_type,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_staff: model.is_staff,
            date_joined: model.date_joined.with_timezone(&Utc),
            phone: model.phone,
            address: model.address,
            location: model.location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Scheme {
    pub id: Uuid,
    pub created_by: Option<Uuid>,
    pub scheme_name: Option<String>,
    pub start_age: Option<i32>,
    pub end_age: Option<i32>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<schemes::Model> for Scheme {
    fn from(model: schemes::Model) -> Self {
        Self {
            id: model.id,
            created_by: model.created_by,
            scheme_name: model.scheme_name,
            start_age: model.start_age,
            end_age: model.end_age,
            description: model.description,
            link: model.link,
            timestamp: model.timestamp.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

impl From<news::Model> for News {
    fn from(model: news::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            date_posted: model.date_posted.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Technique {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl From<agricultural_techniques::Model> for Technique {
    fn from(model: agricultural_techniques::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image: model.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub climate: String,
    pub growth_period: String,
    pub harvesting_time: String,
}

impl From<crops::Model> for Crop {
    fn from(model: crops::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            climate: model.climate,
            growth_period: model.growth_period,
            harvesting_time: model.harvesting_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Solution {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub symptoms: String,
    pub solution: String,
    pub description: String,
}

impl From<solutions::Model> for Solution {
    fn from(model: solutions::Model) -> Self {
        Self {
            id: model.id,
            crop_id: model.crop_id,
            symptoms: model.symptoms,
            solution: model.solution,
            description: model.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub solution_id: Uuid,
    pub user_id: Uuid,
    /// Username of the author.
    pub author: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub posted_by: Option<Uuid>,
    pub crop_type: CropType,
    pub crop_name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub is_out_of_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl From<farmer_products::Model> for Product {
    fn from(model: farmer_products::Model) -> Self {
        Self {
            id: model.id,
            posted_by: model.posted_by,
            crop_type: model.crop_type,
            crop_name: model.crop_name,
            image: model.image,
            price: model.price,
            quantity: model.quantity,
            description: model.description,
            is_out_of_stock: model.is_out_of_stock,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl From<carts::Model> for Cart {
    fn from(model: carts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total_price: model.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl From<cart_items::Model> for CartItem {
    fn from(model: cart_items::Model) -> Self {
        Self {
            id: model.id,
            cart_id: model.cart_id,
            product_id: model.product_id,
            quantity: model.quantity,
            total_price: model.total_price,
        }
    }
}
