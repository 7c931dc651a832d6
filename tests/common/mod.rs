#![allow(dead_code)]

use std::sync::Once;

use farmease_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::auth::RegisterRequest,
    entity::users::UserType,
    middleware::auth::AuthUser,
    services::auth_service,
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};

static JWT_SECRET: Once = Once::new();

/// Connection string for integration tests, `None` when no database is configured.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    JWT_SECRET.call_once(|| {
        if std::env::var("JWT_SECRET").is_err() {
            // SAFETY: runs once, before any test reads the variable.
            unsafe { std::env::set_var("JWT_SECRET", "integration-test-secret") };
        }
    });

    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(database_url).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE cart_items, carts, farmer_products, feedback, solutions, crop_techniques, \
         crops, agricultural_techniques, news, schemes, audit_logs, users CASCADE",
    ))
    .await?;

    let media_root = std::env::temp_dir().join(format!("farmease-test-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&media_root).await?;

    Ok(AppState {
        pool,
        orm,
        media_root,
    })
}

pub fn register_request(user_type: UserType, username: &str) -> RegisterRequest {
    RegisterRequest {
        user_type,
        username: Some(username.to_string()),
        email: Some(format!("{username}@example.com")),
        password: format!("{username}-password"),
        first_name: None,
        last_name: None,
        phone: Some("9876543210".to_string()),
        address: None,
        location: None,
    }
}

pub async fn register(
    state: &AppState,
    user_type: UserType,
    username: &str,
) -> anyhow::Result<AuthUser> {
    let resp = auth_service::register_user(state, register_request(user_type, username)).await?;
    let user = resp.data.expect("registered user");
    Ok(AuthUser {
        user_id: user.id,
        user_type,
        is_staff: false,
    })
}
