//! Server-sent events feed of the post collection.
//!
//! A new subscriber first receives one `added` event per stored post, then
//! every change published after it subscribed.

use std::convert::Infallible;

use actix_web::{HttpResponse, web};
use futures::{StreamExt, stream};

use blog_core::domain::Post;
use blog_core::service::PostEvent;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn event_frame(payload: &str) -> web::Bytes {
    web::Bytes::from(format!("data: {payload}\n\n"))
}

fn snapshot_frames(posts: Vec<Post>) -> Vec<web::Bytes> {
    posts
        .into_iter()
        .filter_map(|post| match serde_json::to_string(&PostEvent::Added(post)) {
            Ok(json) => Some(event_frame(&json)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize post event");
                None
            }
        })
        .collect()
}

/// GET /api/subscribe/posts
pub async fn posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let (snapshot, subscription) = state.posts.subscribe().await?;
    tracing::debug!(posts = snapshot.len(), "Subscriber connected");

    let initial = stream::iter(snapshot_frames(snapshot));
    let live = subscription.map(|message| event_frame(&message.payload));
    let body = initial.chain(live).map(Ok::<_, Infallible>);

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(body))
}
