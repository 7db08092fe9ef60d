//! HTML pages.

use actix_web::{HttpResponse, http::header, web};

use blog_core::DomainError;
use blog_core::schema::PostDraft;

use crate::handlers::html;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, Header, Layout, RouteName};

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let slides = state.posts.slider_posts().await?;
    let posts = state.posts.desktop_posts().await?;

    let page = Layout::new("Blog", None, identity.0.as_ref())
        .with_header(Header::Cold)
        .render(&views::posts::desktop_index(&slides, &posts));
    Ok(html(page))
}

/// GET /home
pub async fn home(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.mobile_posts().await?;

    let page = Layout::new("Home", Some(RouteName::Home), identity.0.as_ref())
        .render(&views::posts::mobile_home(&posts));
    Ok(html(page))
}

/// GET /about
pub async fn about(identity: OptionalIdentity) -> HttpResponse {
    html(Layout::new("About", Some(RouteName::About), identity.0.as_ref()).render(&views::about()))
}

/// GET /contact
pub async fn contact(identity: OptionalIdentity) -> HttpResponse {
    html(
        Layout::new("Contact", Some(RouteName::Contact), identity.0.as_ref())
            .render(&views::contact()),
    )
}

/// GET /posts/{short_id}
///
/// An unknown id renders the page without a post.
pub async fn post_detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.post_detail(&path).await?;
    let title = posts.first().map(|p| p.title.as_str()).unwrap_or("Post");

    let page = Layout::new(title, Some(RouteName::PostDetail), identity.0.as_ref())
        .render(&views::posts::detail(&posts));
    Ok(html(page))
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /create
///
/// Anonymous visitors are sent to `/home`.
pub async fn create_form(identity: OptionalIdentity) -> HttpResponse {
    let Some(identity) = identity.0 else {
        return redirect("/home");
    };

    let content = views::forms::create_post(&PostDraft::default(), &[]);
    html(Layout::new("New post", Some(RouteName::Create), Some(&identity)).render(&content))
}

/// POST /create
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<PostDraft>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/home"));
    };

    let draft = form.into_inner();
    match state.posts.create(Some(identity.user_id), draft.clone()).await {
        Ok(post) => Ok(redirect(&format!("/posts/{}", post.short_id))),
        Err(DomainError::Validation(violations)) => {
            let content = views::forms::create_post(&draft, &violations);
            let page =
                Layout::new("New post", Some(RouteName::Create), Some(&identity)).render(&content);
            Ok(HttpResponse::UnprocessableEntity()
                .content_type("text/html; charset=utf-8")
                .body(page))
        }
        Err(e) => Err(e.into()),
    }
}
