use crate::handlers::{
    auth::{login, signup},
    cart::{add_to_cart, get_cart, remove_from_cart},
    health::health_check,
    posts::{create_post, delete_post, get_post, get_posts, update_post},
    products::{create_product, delete_product, get_product, get_products, update_product},
    social::{follow_user, get_followers, get_following, like_post, unfollow_user, unlike_post},
    users::{delete_me, get_me, get_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Auth routes
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        // User routes
        .route("/api/v1/users/me", get(get_me))
        .route("/api/v1/users/me", delete(delete_me))
        .route("/api/v1/users/:user_id", get(get_user))
        // Follow routes
        .route("/api/v1/users/:user_id/follow", post(follow_user))
        .route("/api/v1/users/:user_id/follow", delete(unfollow_user))
        .route("/api/v1/users/:user_id/followers", get(get_followers))
        .route("/api/v1/users/:user_id/following", get(get_following))
        // Post CRUD routes
        .route("/api/v1/posts", post(create_post))
        .route("/api/v1/posts", get(get_posts))
        .route("/api/v1/posts/:post_id", get(get_post))
        .route("/api/v1/posts/:post_id", put(update_post))
        .route("/api/v1/posts/:post_id", delete(delete_post))
        // Like routes
        .route("/api/v1/posts/:post_id/like", post(like_post))
        .route("/api/v1/posts/:post_id/like", delete(unlike_post))
        // Product CRUD routes
        .route("/api/v1/products", post(create_product))
        .route("/api/v1/products", get(get_products))
        .route("/api/v1/products/:product_id", get(get_product))
        .route("/api/v1/products/:product_id", put(update_product))
        .route("/api/v1/products/:product_id", delete(delete_product))
        // Cart routes
        .route("/api/v1/cart", get(get_cart))
        .route("/api/v1/cart/:product_id", post(add_to_cart))
        .route("/api/v1/cart/:product_id", delete(remove_from_cart))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
