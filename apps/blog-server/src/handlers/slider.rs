//! Slider feed.

use actix_web::{HttpResponse, web};

use blog_shared::dto::SliderPost;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /slider
///
/// Newest posts with display-formatted dates.
pub async fn slider(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let feed: Vec<SliderPost> = state
        .posts
        .slider_posts()
        .await?
        .into_iter()
        .map(|post| {
            SliderPost::new(
                post.title,
                post.short_id,
                &post.date,
                post.keywords,
                post.body,
                post.submitted_by_id.to_string(),
            )
        })
        .collect();

    Ok(HttpResponse::Ok().json(feed))
}
