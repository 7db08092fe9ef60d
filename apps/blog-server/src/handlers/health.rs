//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub posts: &'static str,
    pub timestamp: String,
}

/// GET /api/health
///
/// Reports `degraded` when the post store cannot be read.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let posts = match state.posts.slider_posts().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Post store unavailable");
            "unavailable"
        }
    };

    let response = HealthResponse {
        status: if posts == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        posts,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
