//! User management handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{CreatedUser, PasswordChanged, UserId, UserResponse};
use crate::errors::AppResult;

/// Create user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Must equal `password`. Clients send the field as `confrimPassword`.
    /// An absent password field reads as empty, so the equality check
    /// decides the outcome.
    #[serde(default, rename = "confrimPassword", alias = "confirmPassword")]
    #[schema(example = "SecurePass123!")]
    pub confirm_password: String,
}

/// Update user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Change password request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/change-password", patch(change_password))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 422, description = "Unknown user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreatedUser),
        (status = 403, description = "Password confirmation does not match"),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Failed to create user")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> AppResult<Json<CreatedUser>> {
    let created = state
        .user_service
        .create_user(
            payload.name,
            payload.email,
            &payload.password,
            &payload.confirm_password,
        )
        .await?;

    Ok(Json(created))
}

/// Update user name and email
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserId),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Update failed")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<UserId>> {
    let updated = state
        .user_service
        .update_user(id, &payload.name, &payload.email)
        .await?;

    Ok(Json(updated))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = UserId),
        (status = 422, description = "Failed to delete user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserId>> {
    let deleted = state.user_service.delete_user(id).await?;
    Ok(Json(deleted))
}

/// Change user password
#[utoipa::path(
    patch,
    path = "/api/users/{id}/change-password",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = PasswordChanged),
        (status = 403, description = "Confirmation mismatch or password unchanged"),
        (status = 422, description = "Failed to change Password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> AppResult<Json<PasswordChanged>> {
    let changed = state
        .user_service
        .change_password(
            id,
            payload.old_password,
            payload.new_password,
            &payload.confirm_password,
        )
        .await?;

    Ok(Json(changed))
}
