use crate::schemas::{
    store_error_response, validation_error_response, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use common::UserProfile;
use model::entities::user;
use serde::{Deserialize, Serialize};
use store::projections;
use store::users::NewUser;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating an account
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct SignupRequest {
    /// Username (must be unique)
    #[validate(length(min = 1, max = 45))]
    pub username: String,
    /// Email address (must be unique)
    #[validate(email, length(max = 100))]
    pub email: String,
    /// Plaintext password; only its hash is stored
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Resolve the bearer token on a request to its user.
///
/// This is the boundary between the authentication collaborator and the
/// core: all it needs from the store is the token point-lookup.
pub async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<user::Model, (StatusCode, Json<ErrorResponse>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(unauthorized());
    };

    match store::users::find_by_token(&state.db, token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            warn!("Request carried an unknown bearer token");
            Err(unauthorized())
        }
        Err(store_error) => {
            error!("Failed to resolve bearer token: {}", store_error);
            Err(store_error_response(store_error))
        }
    }
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Missing or invalid bearer token".to_string(),
            code: "UNAUTHORIZED".to_string(),
            success: false,
        }),
    )
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<UserProfile>),
        (status = 400, description = "Duplicate username/email or invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Signing up user");

    if let Err(errors) = request.validate() {
        warn!("Signup request failed validation: {}", errors);
        return Err(validation_error_response(errors));
    }

    let user = store::users::create(
        &state.db,
        NewUser {
            username: request.username,
            email: request.email,
            password: request.password,
        },
    )
    .await
    .map_err(store_error_response)?;

    info!(user_id = user.id, "User signed up");
    let response = ApiResponse {
        data: projections::user_profile(&user),
        message: "You have successfully created an account.".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in successfully", body = ApiResponse<UserProfile>),
        (status = 401, description = "Bad credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Logging in user");

    match store::users::authenticate(&state.db, &request.username, &request.password).await {
        Ok(Some(user)) => {
            info!(user_id = user.id, "User logged in");
            let response = ApiResponse {
                data: projections::user_profile(&user),
                message: "You have successfully logged in.".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Login rejected for username: {}", request.username);
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid username or password".to_string(),
                    code: "INVALID_CREDENTIALS".to_string(),
                    success: false,
                }),
            ))
        }
        Err(store_error) => {
            error!("Login failed: {}", store_error);
            Err(store_error_response(store_error))
        }
    }
}
