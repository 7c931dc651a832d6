mod common;

use farmease_api::{
    dto::{
        auth::LoginRequest,
        cart::{AddToCartRequest, UpdateCartItemRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    entity::{farmer_products::CropType, users::UserType},
    error::AppError,
    routes::params::ProductQuery,
    services::{auth_service, cart_service, product_service},
    validation::ValidationError,
};
use rust_decimal_macros::dec;

// Integration flow: farmer lists produce -> buyer fills cart -> totals follow every change.
#[tokio::test]
async fn product_stock_and_cart_totals_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let farmer = common::register(&state, UserType::Farmer, "farmer").await?;
    let buyer = common::register(&state, UserType::User, "buyer").await?;

    // Duplicate usernames and bad phone numbers are refused.
    let dup = auth_service::register_user(
        &state,
        common::register_request(UserType::User, "buyer"),
    )
    .await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));

    let mut bad_phone = common::register_request(UserType::User, "someone");
    bad_phone.phone = Some("12345".into());
    let bad = auth_service::register_user(&state, bad_phone).await;
    assert!(matches!(
        bad,
        Err(AppError::Validation(ValidationError::InvalidPhone))
    ));

    // Passwords are stored hashed and log in by username or email.
    let login = auth_service::login_user(
        &state,
        LoginRequest {
            login: "buyer@example.com".into(),
            password: "buyer-password".into(),
        },
    )
    .await?;
    assert!(login.data.expect("token").token.starts_with("Bearer "));
    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            login: "buyer".into(),
            password: "nope".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::BadRequest(_))));

    // Only farmers may post products.
    let denied = product_service::create_product(
        &state,
        &buyer,
        CreateProductRequest {
            crop_type: CropType::Fruits,
            crop_name: Some("Mango".into()),
            price: Some(80.0),
            quantity: Some(3),
            description: None,
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let negative = product_service::create_product(
        &state,
        &farmer,
        CreateProductRequest {
            crop_type: CropType::Fruits,
            crop_name: Some("Mango".into()),
            price: Some(-1.0),
            quantity: Some(3),
            description: None,
        },
    )
    .await;
    assert!(matches!(negative, Err(AppError::Validation(_))));

    // Zero quantity means out of stock.
    let tomato = product_service::create_product(
        &state,
        &farmer,
        CreateProductRequest {
            crop_type: CropType::Vegetables,
            crop_name: Some("Tomato".into()),
            price: Some(50.0),
            quantity: Some(0),
            description: Some("Fresh".into()),
        },
    )
    .await?
    .data
    .expect("product");
    assert!(tomato.is_out_of_stock);

    let refused = cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: tomato.id,
            quantity: 1,
        },
    )
    .await;
    assert!(matches!(refused, Err(AppError::BadRequest(_))));

    let restocked = product_service::update_product(
        &state,
        &farmer,
        tomato.id,
        UpdateProductRequest {
            quantity: Some(5),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert!(!restocked.is_out_of_stock);

    let onion = product_service::create_product(
        &state,
        &farmer,
        CreateProductRequest {
            crop_type: CropType::Vegetables,
            crop_name: Some("Onion".into()),
            price: Some(19.99),
            quantity: Some(10),
            description: None,
        },
    )
    .await?
    .data
    .expect("product");

    // Catalogue filters.
    let listed = product_service::list_products(
        &state,
        ProductQuery {
            q: Some("tom".into()),
            in_stock: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let items = listed.data.expect("products").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, tomato.id);

    // Line totals and the cart total follow every change.
    let view = cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: tomato.id,
            quantity: 3,
        },
    )
    .await?
    .data
    .expect("cart");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].item.total_price, dec!(150.00));
    assert_eq!(view.cart.total_price, dec!(150.00));
    assert_eq!(view.label, "Cart for buyer");
    assert_eq!(view.items[0].label, "3 x Tomato in cart for buyer");

    // Adding the same product again merges into the existing line.
    let view = cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: tomato.id,
            quantity: 1,
        },
    )
    .await?
    .data
    .expect("cart");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].item.quantity, 4);
    assert_eq!(view.cart.total_price, dec!(200.00));

    let view = cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: onion.id,
            quantity: 2,
        },
    )
    .await?
    .data
    .expect("cart");
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.cart.total_price, dec!(239.98));

    let tomato_line = view
        .items
        .iter()
        .find(|i| i.product.id == tomato.id)
        .expect("tomato line")
        .item
        .id;
    let onion_line = view
        .items
        .iter()
        .find(|i| i.product.id == onion.id)
        .expect("onion line")
        .item
        .id;

    let view = cart_service::update_item(
        &state,
        &buyer,
        tomato_line,
        UpdateCartItemRequest { quantity: 1 },
    )
    .await?
    .data
    .expect("cart");
    assert_eq!(view.cart.total_price, dec!(89.98));

    // Another user cannot touch this cart's lines.
    let foreign = cart_service::remove_item(&state, &farmer, onion_line).await;
    assert!(matches!(foreign, Err(AppError::NotFound)));

    let view = cart_service::remove_item(&state, &buyer, onion_line)
        .await?
        .data
        .expect("cart");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.cart.total_price, dec!(50.00));

    // Deleting a product drops its cart lines and the total follows.
    product_service::delete_product(&state, &farmer, tomato.id).await?;
    let view = cart_service::get_cart(&state, &buyer)
        .await?
        .data
        .expect("cart");
    assert!(view.items.is_empty());
    assert_eq!(view.cart.total_price, dec!(0));

    Ok(())
}
