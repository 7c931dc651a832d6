mod common;

use farmease_api::{
    dto::{cart::AddToCartRequest, products::CreateProductRequest},
    entity::{
        Carts, carts,
        farmer_products::CropType,
        users::UserType,
    },
    services::{cart_service, product_service},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

// Concurrent adds to a fresh user's cart share one cart, merge lines of the
// same product and leave the total equal to the sum of the lines.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_share_one_cart_and_total() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let farmer = common::register(&state, UserType::Farmer, "bulkfarmer").await?;
    let buyer = common::register(&state, UserType::User, "bulkbuyer").await?;

    let mut product_ids: Vec<Uuid> = Vec::new();
    for (name, price) in [("Rice", 10.0), ("Lentils", 20.5), ("Chilli", 30.25), ("Apple", 40.0)] {
        let product = product_service::create_product(
            &state,
            &farmer,
            CreateProductRequest {
                crop_type: CropType::Vegetables,
                crop_name: Some(name.into()),
                price: Some(price),
                quantity: Some(100),
                description: None,
            },
        )
        .await?
        .data
        .expect("product");
        product_ids.push(product.id);
    }

    // Four different products, two of each, then four more single units of
    // the first product, all at once.
    let mut requests: Vec<(Uuid, i32)> = product_ids.iter().map(|id| (*id, 2)).collect();
    requests.extend(std::iter::repeat_n((product_ids[0], 1), 4));

    let mut handles = Vec::new();
    for (product_id, quantity) in requests {
        let state = state.clone();
        let buyer = buyer.clone();
        handles.push(tokio::spawn(async move {
            cart_service::add_to_cart(
                &state,
                &buyer,
                AddToCartRequest {
                    product_id,
                    quantity,
                },
            )
            .await
            .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let carts_for_buyer = Carts::find()
        .filter(carts::Column::UserId.eq(buyer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(carts_for_buyer, 1);

    let view = cart_service::get_cart(&state, &buyer)
        .await?
        .data
        .expect("cart");
    assert_eq!(view.items.len(), 4);

    let rice = view
        .items
        .iter()
        .find(|line| line.product.id == product_ids[0])
        .expect("rice line");
    assert_eq!(rice.item.quantity, 6);

    let line_sum: Decimal = view.items.iter().map(|line| line.item.total_price).sum();
    assert_eq!(view.cart.total_price, line_sum);
    assert_eq!(view.cart.total_price, dec!(241.50));

    Ok(())
}
