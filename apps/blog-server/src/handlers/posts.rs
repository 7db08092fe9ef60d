//! JSON post collection.
//!
//! Writes carry the caller's identity, if any, into the post service, which
//! decides between 401, 403 and 422.

use actix_web::{HttpResponse, web};

use blog_core::schema::{PostDraft, PostPatch};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.all_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(identity.user_id(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{short_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(identity.user_id(), &path, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{short_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(identity.user_id(), &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
