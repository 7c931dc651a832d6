mod common;

use farmease_api::{
    dto::{
        cart::{AddToCartRequest, UpdateCartItemRequest},
        products::CreateProductRequest,
    },
    entity::{
        cart_items, farmer_products::{self, CropType},
        users::{self, UserType},
    },
    error::AppError,
    password::{is_hashed, verify_password},
    services::{cart_service, product_service},
};
use rust_decimal_macros::dec;
use sea_orm::ActiveValue::{NotSet, Unchanged};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use uuid::Uuid;

fn user_model(username: &str, phone: Option<&str>, password: &str) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_type: Set(UserType::User),
        username: Set(Some(username.to_string())),
        email: Set(None),
        password: Set(password.to_string()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_active: Set(true),
        is_staff: Set(false),
        date_joined: NotSet,
        last_login: Set(None),
        phone: Set(phone.map(str::to_string)),
        address: Set(None),
        location: Set(None),
    }
}

// Save hooks keep derived columns right for full and partial active models.
#[tokio::test]
async fn save_hooks_hold_on_every_save() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    // Phone numbers are checked by the entity itself.
    let rejected = user_model("badphone", Some("12345"), "secret")
        .insert(&state.orm)
        .await;
    match rejected {
        Err(DbErr::Custom(message)) => {
            assert_eq!(message, "Please enter a valid contact number")
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    // A stored hash is kept as it is when saved again.
    let user = user_model("hashme", Some("9123456789"), "plain-secret")
        .insert(&state.orm)
        .await?;
    assert!(is_hashed(&user.password));
    assert_ne!(user.password, "plain-secret");
    let stored = user.password.clone();

    let mut active: users::ActiveModel = user.into();
    active.password = Set(stored.clone());
    let resaved = active.update(&state.orm).await?;
    assert_eq!(resaved.password, stored);
    assert!(verify_password("plain-secret", &resaved.password));

    // A partial product update keeps the stock flag of the stored quantity.
    let farmer = common::register(&state, UserType::Farmer, "hookfarmer").await?;
    let buyer = common::register(&state, UserType::User, "hookbuyer").await?;
    let empty = product_service::create_product(
        &state,
        &farmer,
        CreateProductRequest {
            crop_type: CropType::Grains,
            crop_name: Some("Wheat".into()),
            price: Some(30.0),
            quantity: Some(0),
            description: None,
        },
    )
    .await?
    .data
    .expect("product");
    assert!(empty.is_out_of_stock);

    let touched = farmer_products::ActiveModel {
        id: Unchanged(empty.id),
        description: Set(Some("Harvest due next week".into())),
        ..Default::default()
    }
    .update(&state.orm)
    .await?;
    assert_eq!(touched.quantity, Some(0));
    assert!(touched.is_out_of_stock);

    let restocked = farmer_products::ActiveModel {
        id: Unchanged(empty.id),
        quantity: Set(Some(7)),
        ..Default::default()
    }
    .update(&state.orm)
    .await?;
    assert!(!restocked.is_out_of_stock);

    // A partial cart item update is priced from the stored product.
    let view = cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: empty.id,
            quantity: 2,
        },
    )
    .await?
    .data
    .expect("cart");
    let item_id = view.items[0].item.id;
    let cart_id = view.cart.id;
    assert_eq!(view.cart.total_price, dec!(60.00));

    let item = cart_items::ActiveModel {
        id: Unchanged(item_id),
        quantity: Set(4),
        ..Default::default()
    }
    .update(&state.orm)
    .await?;
    assert_eq!(item.product_id, empty.id);
    assert_eq!(item.total_price, dec!(120.00));

    let cart = farmease_api::entity::Carts::find_by_id(cart_id)
        .one(&state.orm)
        .await?
        .expect("cart");
    assert_eq!(cart.total_price, dec!(120.00));

    // Lines are emptied by deleting them, not by a zero quantity.
    let zero = cart_service::update_item(
        &state,
        &buyer,
        item_id,
        UpdateCartItemRequest { quantity: 0 },
    )
    .await;
    assert!(matches!(zero, Err(AppError::BadRequest(_))));

    Ok(())
}
