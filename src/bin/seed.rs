use farmease_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Crops, FarmerProducts, Schemes, Techniques, Users,
        agricultural_techniques::{self, ActiveModel as TechniqueActive},
        crop_techniques::{self, ActiveModel as CropTechniqueActive},
        crops::{self, ActiveModel as CropActive},
        farmer_products::{self, ActiveModel as ProductActive, CropType},
        schemes::{self, ActiveModel as SchemeActive},
        users::{self, ActiveModel as UserActive, UserType},
    },
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,farmease_api=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let staff_id = ensure_user(&orm, "admin", UserType::User, true, "admin123").await?;
    let farmer_id = ensure_user(&orm, "farmer", UserType::Farmer, false, "farmer123").await?;
    let buyer_id = ensure_user(&orm, "buyer", UserType::User, false, "buyer123").await?;

    let drip = ensure_technique(
        &orm,
        "Drip irrigation",
        "Water delivered directly to the root zone through emitters.",
    )
    .await?;
    let mulching = ensure_technique(
        &orm,
        "Mulching",
        "Covering the soil to retain moisture and suppress weeds.",
    )
    .await?;
    let tomato = ensure_crop(
        &orm,
        "Tomato",
        "Warm season vegetable grown for its fruit.",
        "Warm, 20-27 C",
        "90-120 days",
        "When fruits turn uniformly red",
    )
    .await?;
    for technique_id in [drip, mulching] {
        crop_techniques::Entity::insert(CropTechniqueActive {
            crop_id: Set(tomato),
            technique_id: Set(technique_id),
        })
        .on_conflict(
            OnConflict::columns([
                crop_techniques::Column::CropId,
                crop_techniques::Column::TechniqueId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&orm)
        .await?;
    }

    ensure_scheme(&orm, staff_id, "Young Farmer Support", 18, 40).await?;
    ensure_product(&orm, farmer_id, "Tomato", 50.0, 20).await?;

    tracing::info!(%staff_id, %farmer_id, %buyer_id, "seed completed");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    username: &str,
    user_type: UserType,
    is_staff: bool,
    password: &str,
) -> anyhow::Result<Uuid> {
    if let Some(user) = Users::find()
        .filter(users::Column::Username.eq(username))
        .one(orm)
        .await?
    {
        return Ok(user.id);
    }

    // The save hook hashes the raw password.
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        user_type: Set(user_type),
        username: Set(Some(username.to_string())),
        email: Set(Some(format!("{username}@example.com"))),
        password: Set(password.to_string()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_active: Set(true),
        is_staff: Set(is_staff),
        date_joined: NotSet,
        last_login: Set(None),
        phone: Set(None),
        address: Set(None),
        location: Set(None),
    }
    .insert(orm)
    .await?;

    tracing::info!(username, user_type = user_type.as_str(), is_staff, "user created");
    Ok(user.id)
}

async fn ensure_technique(
    orm: &DatabaseConnection,
    title: &str,
    description: &str,
) -> anyhow::Result<Uuid> {
    if let Some(technique) = Techniques::find()
        .filter(agricultural_techniques::Column::Title.eq(title))
        .one(orm)
        .await?
    {
        return Ok(technique.id);
    }

    let technique = TechniqueActive {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        image: Set(None),
    }
    .insert(orm)
    .await?;
    Ok(technique.id)
}

async fn ensure_crop(
    orm: &DatabaseConnection,
    name: &str,
    description: &str,
    climate: &str,
    growth_period: &str,
    harvesting_time: &str,
) -> anyhow::Result<Uuid> {
    if let Some(crop) = Crops::find()
        .filter(crops::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(crop.id);
    }

    let crop = CropActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        climate: Set(climate.to_string()),
        growth_period: Set(growth_period.to_string()),
        harvesting_time: Set(harvesting_time.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(crop.id)
}

async fn ensure_scheme(
    orm: &DatabaseConnection,
    created_by: Uuid,
    name: &str,
    start_age: i32,
    end_age: i32,
) -> anyhow::Result<()> {
    let exists = Schemes::find()
        .filter(schemes::Column::SchemeName.eq(name))
        .one(orm)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    SchemeActive {
        id: Set(Uuid::new_v4()),
        created_by: Set(Some(created_by)),
        scheme_name: Set(Some(name.to_string())),
        start_age: Set(Some(start_age)),
        end_age: Set(Some(end_age)),
        description: Set(Some(format!("Support for farmers aged {start_age} to {end_age}."))),
        link: Set(None),
        timestamp: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(())
}

async fn ensure_product(
    orm: &DatabaseConnection,
    farmer_id: Uuid,
    crop_name: &str,
    price: f64,
    quantity: i32,
) -> anyhow::Result<()> {
    let exists = FarmerProducts::find()
        .filter(farmer_products::Column::PostedBy.eq(farmer_id))
        .filter(farmer_products::Column::CropName.eq(crop_name))
        .one(orm)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    ProductActive {
        id: Set(Uuid::new_v4()),
        posted_by: Set(Some(farmer_id)),
        crop_type: Set(CropType::Vegetables),
        crop_name: Set(Some(crop_name.to_string())),
        image: Set(None),
        price: Set(Some(price)),
        quantity: Set(Some(quantity)),
        description: Set(Some(format!("Fresh {crop_name} from the farm"))),
        is_out_of_stock: Set(false),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(())
}
