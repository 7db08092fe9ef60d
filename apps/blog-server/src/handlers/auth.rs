//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blog_core::ports::AuthError;
use blog_shared::dto::{AuthResponse, LoginRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Check credentials and issue a session token.
///
/// Unknown emails and wrong passwords fail the same way.
pub async fn sign_in(state: &AppState, req: &LoginRequest) -> AppResult<String> {
    let user = state
        .users
        .find_by_email(req.email.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.generate_token(user.id, &user.email)?;
    tracing::info!(user_id = %user.id, "User signed in");
    Ok(token)
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let token = sign_in(&state, &body).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.user_id.to_string(),
        email: identity.email,
    }))
}
