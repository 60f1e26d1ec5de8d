use crate::schemas::{
    store_error_response, validation_error_response, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::ProductView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store::products::{NewProduct, ProductChanges};
use store::projections;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new product
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Image reference
    #[validate(length(min = 1))]
    pub img_url: String,
    /// Optional description
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Price with two fraction digits; must not be negative
    pub price: Decimal,
}

/// Request body for updating a product
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    /// Product name
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// Image reference
    #[validate(length(min = 1))]
    pub img_url: Option<String>,
    /// Description
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Price with two fraction digits; must not be negative
    pub price: Option<Decimal>,
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductView>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductView>>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(errors) = request.validate() {
        warn!("Create product request failed validation: {}", errors);
        return Err(validation_error_response(errors));
    }

    debug!("Creating product");

    let product = store::products::create(
        &state.db,
        NewProduct {
            name: request.name,
            img_url: request.img_url,
            description: request.description,
            price: request.price,
        },
    )
    .await
    .map_err(store_error_response)?;

    info!(product_id = product.id, "Product created");
    let response = ApiResponse {
        data: projections::product_view(&product),
        message: "Product created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductView>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, (StatusCode, Json<ErrorResponse>)> {
    let products = store::products::all(&state.db)
        .await
        .map_err(store_error_response)?;

    let views: Vec<ProductView> = products.iter().map(projections::product_view).collect();

    debug!("Retrieved {} products", views.len());
    let response = ApiResponse {
        data: views,
        message: "Products retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a specific product by ID
#[utoipa::path(
    get,
    path = "/api/v1/products/{product_id}",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<ProductView>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProductView>>, (StatusCode, Json<ErrorResponse>)> {
    let product = store::products::find_by_id(&state.db, product_id)
        .await
        .map_err(store_error_response)?
        .ok_or_else(|| {
            warn!("Product with ID {} not found", product_id);
            store_error_response(store::error::StoreError::NotFound("product"))
        })?;

    let response = ApiResponse {
        data: projections::product_view(&product),
        message: "Product retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/products/{product_id}",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductView>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductView>>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(errors) = request.validate() {
        warn!("Update product request failed validation: {}", errors);
        return Err(validation_error_response(errors));
    }

    let updated = store::products::update(
        &state.db,
        product_id,
        ProductChanges {
            name: request.name,
            img_url: request.img_url,
            description: request.description,
            price: request.price,
        },
    )
    .await
    .map_err(store_error_response)?;

    info!(product_id, "Product updated");
    let response = ApiResponse {
        data: projections::product_view(&updated),
        message: "Product updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{product_id}",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    store::products::delete(&state.db, product_id)
        .await
        .map_err(store_error_response)?;

    info!(product_id, "Product deleted");
    let response = ApiResponse {
        data: format!("Product {} deleted", product_id),
        message: "Product deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
