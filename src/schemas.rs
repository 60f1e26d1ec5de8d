use axum::http::StatusCode;
use axum::response::Json;
use common::{PostView, ProductView, UserProfile};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use store::error::StoreError;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use validator::ValidationErrors;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Map a store error onto the wire: conflicts and validation failures are
/// client errors, lookup misses are 404, everything database-side is an
/// internal failure that the handler does not try to recover from.
pub fn store_error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        StoreError::Conflict { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message,
                code: format!("{}_TAKEN", field.to_uppercase()),
                success: false,
            }),
        ),
        StoreError::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message,
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ),
        StoreError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("{what} not found"),
                code: "NOT_FOUND".to_string(),
                success: false,
            }),
        ),
        StoreError::Database(db_error) => {
            error!("Database error reached the handler: {}", db_error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            )
        }
        StoreError::PasswordHash(hash_error) => {
            error!("Password hashing failed: {}", hash_error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "HASH_ERROR".to_string(),
                    success: false,
                }),
            )
        }
    }
}

/// Map request validation failures (field bounds, email shape) to a 400.
pub fn validation_error_response(errors: ValidationErrors) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: errors.to_string(),
            code: "INVALID_REQUEST".to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::users::get_me,
        crate::handlers::users::get_user,
        crate::handlers::users::delete_me,
        crate::handlers::posts::create_post,
        crate::handlers::posts::get_posts,
        crate::handlers::posts::get_post,
        crate::handlers::posts::update_post,
        crate::handlers::posts::delete_post,
        crate::handlers::products::create_product,
        crate::handlers::products::get_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::social::follow_user,
        crate::handlers::social::unfollow_user,
        crate::handlers::social::get_followers,
        crate::handlers::social::get_following,
        crate::handlers::social::like_post,
        crate::handlers::social::unlike_post,
        crate::handlers::cart::get_cart,
        crate::handlers::cart::add_to_cart,
        crate::handlers::cart::remove_from_cart,
    ),
    components(
        schemas(
            ApiResponse<UserProfile>,
            ApiResponse<Vec<UserProfile>>,
            ApiResponse<PostView>,
            ApiResponse<Vec<PostView>>,
            ApiResponse<ProductView>,
            ApiResponse<Vec<ProductView>>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            UserProfile,
            PostView,
            ProductView,
            crate::handlers::auth::SignupRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::posts::CreatePostRequest,
            crate::handlers::posts::UpdatePostRequest,
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup and login"),
        (name = "users", description = "User lookup and account removal"),
        (name = "posts", description = "Post CRUD"),
        (name = "products", description = "Storefront product CRUD"),
        (name = "social", description = "Follow and like relations"),
        (name = "cart", description = "Shopping cart membership"),
    ),
    info(
        title = "Snapmarket API",
        description = "Social feed with a storefront: posts, likes, follows and a shopping cart",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
