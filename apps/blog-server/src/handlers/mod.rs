//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;
mod session;
mod slider;
mod subscribe;

use actix_web::{HttpResponse, web};

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/home", web::get().to(pages::home))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .route("/posts/{short_id}", web::get().to(pages::post_detail))
        .service(
            web::resource("/create")
                .route(web::get().to(pages::create_form))
                .route(web::post().to(pages::create)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(session::login_form))
                .route(web::post().to(session::login)),
        )
        .route("/logout", web::post().to(session::logout))
        .route("/slider", web::get().to(slider::slider))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list))
                        .route("", web::post().to(posts::create))
                        .route("/{short_id}", web::put().to(posts::update))
                        .route("/{short_id}", web::delete().to(posts::delete)),
                )
                .route("/subscribe/posts", web::get().to(subscribe::posts)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use chrono::{TimeDelta, TimeZone, Utc};
    use uuid::Uuid;

    use blog_core::PostService;
    use blog_core::domain::Post;
    use blog_core::ports::BaseRepository;
    use blog_infra::{InMemoryPostRepository, InMemoryPubSub, InMemoryUserRepository, JwtConfig};

    use crate::config::AdminAccount;
    use crate::state::AppState;

    const EMAIL: &str = "writer@example.com";
    const PASSWORD: &str = "correct horse battery";

    fn state_with(repo: Arc<InMemoryPostRepository>) -> AppState {
        AppState::from_parts(
            PostService::new(repo, Arc::new(InMemoryPubSub::new(16))),
            Arc::new(InMemoryUserRepository::new()),
            JwtConfig::default(),
            false,
        )
    }

    async fn state_with_account() -> AppState {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        state
            .ensure_account(&AdminAccount {
                email: EMAIL.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();
        state
    }

    fn seeded_post(short_id: &str, days_ago: i64) -> Post {
        Post::new(
            short_id.to_string(),
            Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap() - TimeDelta::days(days_ago),
            Uuid::new_v4(),
            format!("Post {short_id}"),
            "rust".to_string(),
            "body".to_string(),
        )
    }

    fn bearer(state: &AppState, user_id: Uuid) -> String {
        let token = state.tokens.generate_token(user_id, "someone@example.com").unwrap();
        format!("Bearer {token}")
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_redirects_anonymous_to_home() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/create").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/home");
    }

    #[actix_web::test]
    async fn test_slider_returns_newest_four_as_json() {
        let repo = Arc::new(InMemoryPostRepository::new());
        for (i, id) in ["p0", "p1", "p2", "p3", "p4", "p5"].iter().enumerate() {
            repo.save(seeded_post(id, i as i64 + 15)).await.unwrap();
        }
        let state = state_with(repo);
        let app = app!(state);

        let req = test::TestRequest::get().uri("/slider").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        let feed = body.as_array().unwrap();
        assert_eq!(feed.len(), 4);
        assert_eq!(feed[0]["shortId"], "p0");
        assert_eq!(feed[0]["date"], "January 05, 2024");
        assert_eq!(feed[3]["shortId"], "p3");
        assert!(feed[0].get("id").is_none());
    }

    #[actix_web::test]
    async fn test_unknown_post_renders_empty_page() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/posts/missing").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("post-detail"));
        assert!(!html.contains("<article"));
    }

    #[actix_web::test]
    async fn test_index_skips_slider_posts_in_list() {
        let repo = Arc::new(InMemoryPostRepository::new());
        for i in 0..6 {
            repo.save(seeded_post(&format!("p{i}"), i)).await.unwrap();
        }
        let state = state_with(repo);
        let app = app!(state);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("cold-header"));
        assert_eq!(html.matches(r#"href="/posts/p0""#).count(), 1);
        assert_eq!(html.matches(r#"href="/posts/p5""#).count(), 1);
    }

    #[actix_web::test]
    async fn test_anonymous_api_insert_is_unauthorized() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "t", "keywords": "k", "body": "b"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_api_insert_reports_violations() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, bearer(&state, Uuid::new_v4())))
            .set_json(serde_json::json!({"title": "x".repeat(61), "keywords": "k"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "body");
        assert_eq!(body["errors"][0]["rule"], "required");
        assert_eq!(body["errors"][1]["field"], "title");
        assert_eq!(body["errors"][1]["rule"], "max");
    }

    #[actix_web::test]
    async fn test_only_submitter_may_delete() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);
        let owner = Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, bearer(&state, owner)))
            .set_json(serde_json::json!({"title": "t", "keywords": "k", "body": "b"}))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let short_id = created["shortId"].as_str().unwrap().to_string();
        assert_eq!(created["submittedById"], owner.to_string());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{short_id}"))
            .insert_header((header::AUTHORIZATION, bearer(&state, Uuid::new_v4())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{short_id}"))
            .insert_header((header::AUTHORIZATION, bearer(&state, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_any_user_may_update() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, bearer(&state, Uuid::new_v4())))
            .set_json(serde_json::json!({"title": "t", "keywords": "k", "body": "b"}))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let short_id = created["shortId"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{short_id}"))
            .insert_header((header::AUTHORIZATION, bearer(&state, Uuid::new_v4())))
            .set_json(serde_json::json!({"title": "edited"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated["title"], "edited");
        assert_eq!(updated["shortId"], short_id.as_str());
        assert_eq!(updated["date"], created["date"]);
    }

    #[actix_web::test]
    async fn test_bad_login_rerenders_form() {
        let state = state_with_account().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", EMAIL), ("password", "wrong")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("Invalid email or password"));
    }

    #[actix_web::test]
    async fn test_login_then_create_through_form() {
        let state = state_with_account().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", EMAIL), ("password", PASSWORD)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/home");
        let session: Cookie<'static> = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .unwrap()
            .into_owned();

        let req = test::TestRequest::get()
            .uri("/create")
            .cookie(session.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/create")
            .cookie(session.clone())
            .set_form([("title", ""), ("keywords", "k"), ("body", "b")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("Title is required"));

        let req = test::TestRequest::post()
            .uri("/create")
            .cookie(session)
            .set_form([("title", "Hello"), ("keywords", "k"), ("body", "b")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("/posts/"));

        let posts = state.posts.all_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(location, format!("/posts/{}", posts[0].short_id));
    }

    #[actix_web::test]
    async fn test_me_requires_session() {
        let state = state_with(Arc::new(InMemoryPostRepository::new()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let user_id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::AUTHORIZATION, bearer(&state, user_id)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], user_id.to_string());
    }
}
