use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod cart;
pub mod crops;
pub mod doc;
pub mod health;
pub mod news;
pub mod params;
pub mod products;
pub mod schemes;
pub mod solutions;
pub mod techniques;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", auth::users_router())
        .nest("/schemes", schemes::router())
        .nest("/news", news::router())
        .nest("/techniques", techniques::router())
        .nest("/crops", crops::router())
        .nest("/solutions", solutions::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
}
