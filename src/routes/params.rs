use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::farmer_products::CropType;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

// Query strings are decoded without `#[serde(flatten)]`: flattened fields
// reach serde as strings and numeric pagination would fail to parse.
macro_rules! paginated {
    ($($query:ty),*) => {
        $(impl $query {
            pub fn pagination(&self) -> Pagination {
                Pagination {
                    page: self.page,
                    per_page: self.per_page,
                }
            }
        })*
    };
}

paginated!(ProductQuery, SchemeQuery, SolutionQuery);

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    CropName,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive match on the crop name.
    pub q: Option<String>,
    pub crop_type: Option<CropType>,
    pub in_stock: Option<bool>,
    pub posted_by: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SchemeQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Only schemes whose age range contains this age.
    pub age: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AgeQuery {
    pub age: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SolutionQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub crop_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadQuery {
    pub filename: String,
}
