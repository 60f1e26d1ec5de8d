use crate::handlers::auth::require_user;
use crate::schemas::{store_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::ProductView;
use store::projections;
use tracing::{debug, info, instrument};

/// Get the authenticated user's cart contents
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Cart retrieved successfully", body = ApiResponse<Vec<ProductView>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    let products = store::cart::contents(&state.db, me.id)
        .await
        .map_err(store_error_response)?;

    let views: Vec<ProductView> = products.iter().map(projections::product_view).collect();

    debug!(user_id = me.id, "Cart has {} products", views.len());
    let response = ApiResponse {
        data: views,
        message: "Cart retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Add a product to the authenticated user's cart
#[utoipa::path(
    post,
    path = "/api/v1/cart/{product_id}",
    tag = "cart",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product added to cart", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn add_to_cart(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::cart::add(&state.db, me.id, product_id)
        .await
        .map_err(store_error_response)?;

    info!(user_id = me.id, product_id, "Product added to cart");
    let response = ApiResponse {
        data: format!("Product {} added to cart", product_id),
        message: "Product added to cart".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Remove a product from the authenticated user's cart
#[utoipa::path(
    delete,
    path = "/api/v1/cart/{product_id}",
    tag = "cart",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product removed from cart", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn remove_from_cart(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::cart::remove(&state.db, me.id, product_id)
        .await
        .map_err(store_error_response)?;

    let response = ApiResponse {
        data: format!("Product {} removed from cart", product_id),
        message: "Product removed from cart".to_string(),
        success: true,
    };
    Ok(Json(response))
}
