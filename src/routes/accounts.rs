use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, info};

use crate::accounts::{AccountError, NewUser};
use crate::app::AppState;
use crate::error::ApiError;
use crate::models::api::{SignupRequest, SignupResponse, UserView};

/// Account routes. The one handler whose state change is local (the account
/// store) rather than forwarded upstream.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/signup", post(signup))
}

/// POST /signup - Create an account record for an upstream user id.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(ApiError::Validation("invalid email address".to_string()));
    }
    if request.external_user_id.trim().is_empty() {
        return Err(ApiError::Validation(
            "external_user_id is required".to_string(),
        ));
    }

    let existing = state
        .accounts
        .find_by_email_or_id(&request.email, &request.external_user_id)
        .await
        .map_err(|e| {
            error!("Account lookup failed: {e}");
            ApiError::Internal("account lookup failed".to_string())
        })?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "User with this email or ID already exists".to_string(),
        ));
    }

    // The store enforces uniqueness atomically; a concurrent signup that
    // slipped past the lookup above still surfaces as a conflict here.
    let user = state
        .accounts
        .create(NewUser {
            id: request.external_user_id,
            email: request.email,
            subscription_tier: request.subscription_tier,
        })
        .await
        .map_err(|e| match e {
            AccountError::Conflict => ApiError::Conflict(
                "User with this email or ID already exists".to_string(),
            ),
            AccountError::Store(e) => {
                error!("Error creating user: {e}");
                ApiError::Internal("error creating user".to_string())
            }
        })?;

    info!("Created user {}", user.id);

    Ok(Json(SignupResponse {
        message: "User created successfully".to_string(),
        user: UserView {
            id: user.id,
            email: user.email,
            subscription_tier: user.subscription_tier,
            created_at: user.created_at.to_rfc3339(),
        },
    }))
}
