use crate::handlers::auth::require_user;
use crate::schemas::{
    store_error_response, validation_error_response, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use common::PostView;
use serde::{Deserialize, Serialize};
use store::posts::{NewPost, PostChanges};
use store::projections;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new post
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreatePostRequest {
    /// Post title
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    /// Image reference
    #[validate(length(min = 1))]
    pub img_url: String,
    /// Optional caption
    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

/// Request body for updating a post
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdatePostRequest {
    /// Post title
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    /// Image reference
    #[validate(length(min = 1))]
    pub img_url: Option<String>,
    /// Caption
    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

fn forbidden() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            error: "Only the author can modify a post".to_string(),
            code: "FORBIDDEN".to_string(),
            success: false,
        }),
    )
}

/// Create a new post authored by the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = ApiResponse<PostView>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers, request))]
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostView>>), (StatusCode, Json<ErrorResponse>)> {
    let user = require_user(&state, &headers).await?;

    if let Err(errors) = request.validate() {
        warn!("Create post request failed validation: {}", errors);
        return Err(validation_error_response(errors));
    }

    debug!(user_id = user.id, title = %request.title, "Creating post");

    let post = store::posts::create(
        &state.db,
        NewPost {
            title: request.title,
            img_url: request.img_url,
            caption: request.caption,
            user_id: user.id,
        },
    )
    .await
    .map_err(store_error_response)?;

    let view = projections::post_view(&state.db, &post)
        .await
        .map_err(store_error_response)?;

    info!(post_id = post.id, "Post created");
    let response = ApiResponse {
        data: view,
        message: "Post created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all posts, newest first
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts retrieved successfully", body = ApiResponse<Vec<PostView>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PostView>>>, (StatusCode, Json<ErrorResponse>)> {
    let posts = store::posts::all(&state.db)
        .await
        .map_err(store_error_response)?;

    let mut views = Vec::with_capacity(posts.len());
    for post in &posts {
        let view = projections::post_view(&state.db, post)
            .await
            .map_err(store_error_response)?;
        views.push(view);
    }

    debug!("Retrieved {} posts", views.len());
    let response = ApiResponse {
        data: views,
        message: "Posts retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a specific post by ID
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Post retrieved successfully", body = ApiResponse<PostView>),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PostView>>, (StatusCode, Json<ErrorResponse>)> {
    let post = store::posts::find_by_id(&state.db, post_id)
        .await
        .map_err(store_error_response)?
        .ok_or_else(|| {
            warn!("Post with ID {} not found", post_id);
            store_error_response(store::error::StoreError::NotFound("post"))
        })?;

    let view = projections::post_view(&state.db, &post)
        .await
        .map_err(store_error_response)?;

    let response = ApiResponse {
        data: view,
        message: "Post retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a post; only its author may do so
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated successfully", body = ApiResponse<PostView>),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers, request))]
pub async fn update_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostView>>, (StatusCode, Json<ErrorResponse>)> {
    let user = require_user(&state, &headers).await?;

    if let Err(errors) = request.validate() {
        warn!("Update post request failed validation: {}", errors);
        return Err(validation_error_response(errors));
    }

    let existing = store::posts::find_by_id(&state.db, post_id)
        .await
        .map_err(store_error_response)?
        .ok_or_else(|| store_error_response(store::error::StoreError::NotFound("post")))?;

    if existing.user_id != user.id {
        warn!(
            post_id,
            user_id = user.id,
            "Rejected update of another user's post"
        );
        return Err(forbidden());
    }

    let updated = store::posts::update(
        &state.db,
        post_id,
        PostChanges {
            title: request.title,
            img_url: request.img_url,
            caption: request.caption,
        },
    )
    .await
    .map_err(store_error_response)?;

    let view = projections::post_view(&state.db, &updated)
        .await
        .map_err(store_error_response)?;

    info!(post_id, "Post updated");
    let response = ApiResponse {
        data: view,
        message: "Post updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a post; only its author may do so
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
    ),
    responses(
        (status = 200, description = "Post deleted successfully", body = ApiResponse<String>),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn delete_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let user = require_user(&state, &headers).await?;

    let existing = store::posts::find_by_id(&state.db, post_id)
        .await
        .map_err(store_error_response)?
        .ok_or_else(|| store_error_response(store::error::StoreError::NotFound("post")))?;

    if existing.user_id != user.id {
        warn!(
            post_id,
            user_id = user.id,
            "Rejected deletion of another user's post"
        );
        return Err(forbidden());
    }

    store::posts::delete(&state.db, post_id)
        .await
        .map_err(store_error_response)?;

    info!(post_id, "Post deleted");
    let response = ApiResponse {
        data: format!("Post {} deleted", post_id),
        message: "Post deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
