use sea_orm::{ActiveValue, Value};

pub mod agricultural_techniques;
pub mod cart_items;
pub mod carts;
pub mod crop_techniques;
pub mod crops;
pub mod farmer_products;
pub mod feedback;
pub mod news;
pub mod schemes;
pub mod solutions;
pub mod users;

pub use agricultural_techniques::Entity as Techniques;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use crop_techniques::Entity as CropTechniques;
pub use crops::Entity as Crops;
pub use farmer_products::Entity as FarmerProducts;
pub use feedback::Entity as Feedback;
pub use news::Entity as News;
pub use schemes::Entity as Schemes;
pub use solutions::Entity as Solutions;
pub use users::Entity as Users;

/// The value a save hook will write or keep, `None` when the column is not set.
pub(crate) fn value_of<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}
