use crate::handlers::auth::require_user;
use crate::schemas::{store_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::UserProfile;
use store::projections;
use tracing::{info, instrument};

/// Follow a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/follow",
    tag = "social",
    params(
        ("user_id" = i32, Path, description = "User to follow"),
    ),
    responses(
        (status = 200, description = "Follow recorded", body = ApiResponse<String>),
        (status = 400, description = "Cannot follow yourself", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn follow_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::social::follow(&state.db, me.id, user_id)
        .await
        .map_err(store_error_response)?;

    info!(follower_id = me.id, followed_id = user_id, "Follow recorded");
    let response = ApiResponse {
        data: format!("Now following user {}", user_id),
        message: "Follow recorded".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Unfollow a user; unfollowing someone you don't follow is a no-op
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/follow",
    tag = "social",
    params(
        ("user_id" = i32, Path, description = "User to unfollow"),
    ),
    responses(
        (status = 200, description = "Follow removed", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn unfollow_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::social::unfollow(&state.db, me.id, user_id)
        .await
        .map_err(store_error_response)?;

    let response = ApiResponse {
        data: format!("No longer following user {}", user_id),
        message: "Follow removed".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the users following the given user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/followers",
    tag = "social",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Followers retrieved successfully", body = ApiResponse<Vec<UserProfile>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_followers(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, Json<ErrorResponse>)> {
    let users = store::social::followers(&state.db, user_id)
        .await
        .map_err(store_error_response)?;

    let profiles: Vec<UserProfile> = users.iter().map(projections::user_profile).collect();
    let response = ApiResponse {
        data: profiles,
        message: "Followers retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the users the given user follows
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/following",
    tag = "social",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Followed users retrieved successfully", body = ApiResponse<Vec<UserProfile>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_following(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, Json<ErrorResponse>)> {
    let users = store::social::following(&state.db, user_id)
        .await
        .map_err(store_error_response)?;

    let profiles: Vec<UserProfile> = users.iter().map(projections::user_profile).collect();
    let response = ApiResponse {
        data: profiles,
        message: "Followed users retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Like a post; liking it twice changes nothing
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/like",
    tag = "social",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Like recorded", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn like_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::social::like(&state.db, me.id, post_id)
        .await
        .map_err(store_error_response)?;

    info!(user_id = me.id, post_id, "Like recorded");
    let response = ApiResponse {
        data: format!("Liked post {}", post_id),
        message: "Like recorded".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Remove a like; removing an absent like is a no-op
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/like",
    tag = "social",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Like removed", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn unlike_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let me = require_user(&state, &headers).await?;

    store::social::unlike(&state.db, me.id, post_id)
        .await
        .map_err(store_error_response)?;

    let response = ApiResponse {
        data: format!("Unliked post {}", post_id),
        message: "Like removed".to_string(),
        success: true,
    };
    Ok(Json(response))
}
