//! Form login and logout.

use actix_web::{HttpResponse, http::header, web};

use blog_shared::dto::LoginRequest;

use crate::handlers::auth::sign_in;
use crate::handlers::html;
use crate::middleware::auth::{OptionalIdentity, expired_session_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{self, Layout, RouteName};

fn login_page(email: &str, message: Option<&str>) -> String {
    Layout::new("Log in", Some(RouteName::Login), None).render(&views::forms::login(email, message))
}

/// GET /login
pub async fn login_form(identity: OptionalIdentity) -> HttpResponse {
    let content = views::forms::login("", None);
    html(
        Layout::new("Log in", Some(RouteName::Login), identity.0.as_ref()).render(&content),
    )
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginRequest>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match sign_in(&state, &form).await {
        Ok(token) => Ok(HttpResponse::SeeOther()
            .cookie(session_cookie(
                token,
                state.tokens.expiration_seconds(),
                state.cookie_secure,
            ))
            .insert_header((header::LOCATION, "/home"))
            .finish()),
        Err(AppError::Unauthorized(_)) => Ok(HttpResponse::Unauthorized()
            .content_type("text/html; charset=utf-8")
            .body(login_page(&form.email, Some("Invalid email or password")))),
        Err(e) => Err(e),
    }
}

/// POST /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .cookie(expired_session_cookie())
        .insert_header((header::LOCATION, "/home"))
        .finish()
}
