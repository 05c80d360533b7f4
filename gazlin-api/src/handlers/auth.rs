use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role};
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(user) = state
        .users
        .authenticate(&request.username, &request.password)
        .await
    else {
        warn!(username = %request.username, "failed login attempt");
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
            "",
        ));
    };

    let token = state.tokens.issue(user.id, &user.username, user.role)?;
    info!(username = %user.username, role = %user.role, "user logged in");
    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}

/// Create a `user` account and sign the caller in. Admins are only provisioned
/// through configuration.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let role = request.role.unwrap_or(Role::User);
    if role != Role::User {
        warn!(username = %request.username, role = %role, "refused privileged signup");
        return Err(ApiError::forbidden());
    }

    let user = state
        .users
        .register(&request.username, &request.password, role)
        .await?;
    let token = state.tokens.issue(user.id, &user.username, user.role)?;
    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user, token })))
}
