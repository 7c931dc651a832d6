use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        advisory::{
            CreateCropRequest, CreateFeedbackRequest, CreateNewsRequest, CreateSolutionRequest,
            CreateTechniqueRequest, CropDetail, CropList, FeedbackList, LinkTechniqueRequest,
            NewsList, SolutionDetail, SolutionList, TechniqueList,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
        cart::{AddToCartRequest, CartItemDto, CartView, UpdateCartItemRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        schemes::{Eligibility, SchemeList, SchemeRequest},
    },
    entity::{farmer_products::CropType, users::UserType},
    models::{Cart, CartItem, Crop, Feedback, News, Product, Scheme, Solution, Technique, User},
    response::{ApiResponse, Meta},
    routes::{
        auth, cart, crops, health, news, params, products, schemes, solutions, techniques,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        auth::register,
        auth::login,
        auth::me,
        auth::update_me,
        schemes::list_schemes,
        schemes::get_scheme,
        schemes::check_eligibility,
        schemes::create_scheme,
        schemes::update_scheme,
        schemes::delete_scheme,
        news::list_news,
        news::get_news,
        news::create_news,
        news::delete_news,
        techniques::list_techniques,
        techniques::get_technique,
        techniques::create_technique,
        techniques::upload_image,
        techniques::delete_technique,
        crops::list_crops,
        crops::get_crop,
        crops::create_crop,
        crops::link_technique,
        crops::delete_crop,
        solutions::list_solutions,
        solutions::get_solution,
        solutions::create_solution,
        solutions::delete_solution,
        solutions::list_feedback,
        solutions::create_feedback,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::upload_image,
        products::delete_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_item,
        cart::remove_item
    ),
    components(
        schemas(
            UserType,
            CropType,
            User,
            Scheme,
            News,
            Technique,
            Crop,
            Solution,
            Feedback,
            Product,
            Cart,
            CartItem,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            SchemeRequest,
            SchemeList,
            Eligibility,
            CreateNewsRequest,
            NewsList,
            CreateTechniqueRequest,
            TechniqueList,
            CreateCropRequest,
            LinkTechniqueRequest,
            CropList,
            CropDetail,
            CreateSolutionRequest,
            SolutionDetail,
            SolutionList,
            CreateFeedbackRequest,
            FeedbackList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartItemDto,
            CartView,
            health::HealthData,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<SchemeList>,
            ApiResponse<CropDetail>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "The signed-in user's profile"),
        (name = "Schemes", description = "Government schemes and age eligibility"),
        (name = "News", description = "Agricultural news"),
        (name = "Techniques", description = "Farming techniques"),
        (name = "Crops", description = "Crops and their techniques"),
        (name = "Solutions", description = "Crop problem solutions"),
        (name = "Feedback", description = "Feedback on solutions"),
        (name = "Products", description = "Farmer marketplace listings"),
        (name = "Cart", description = "Shopping cart"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
