use crate::handlers::auth::require_user;
use crate::schemas::{store_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::UserProfile;
use store::projections;
use tracing::{debug, info, instrument, warn};

/// Get the authenticated user's own profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<UserProfile>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, Json<ErrorResponse>)> {
    let user = require_user(&state, &headers).await?;

    debug!(user_id = user.id, "Returning own profile");
    let response = ApiResponse {
        data: projections::user_profile(&user),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a user's profile by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<UserProfile>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, Json<ErrorResponse>)> {
    match store::users::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => {
            let response = ApiResponse {
                data: projections::user_profile(&user),
                message: "Profile retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "user not found".to_string(),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ))
        }
        Err(store_error) => Err(store_error_response(store_error)),
    }
}

/// Delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Account deleted successfully", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn delete_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let user = require_user(&state, &headers).await?;

    store::users::delete(&state.db, user.id)
        .await
        .map_err(store_error_response)?;

    info!(user_id = user.id, "Account deleted");
    let response = ApiResponse {
        data: format!("User {} deleted", user.id),
        message: "Account deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
