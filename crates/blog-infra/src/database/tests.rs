use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, Page, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(short_id: &str, day: u32) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        short_id: short_id.to_owned(),
        title: format!("Post {short_id}"),
        date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap().into(),
        keywords: "rust".to_owned(),
        body: "Body".to_owned(),
        submitted_by_id: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_find_post_by_short_id() {
    let row = model("abc123", 5);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let found = repo.find_by_short_id("abc123").await.unwrap().unwrap();

    assert_eq!(found.id, row.id);
    assert_eq!(found.short_id, "abc123");
    assert_eq!(found.title, "Post abc123");
}

#[tokio::test]
async fn test_find_by_short_id_miss_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_short_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_recent_orders_and_pages() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("b", 2), model("a", 1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_recent(Page::new(4, 6)).await.unwrap();
    assert_eq!(posts.len(), 2);

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("ORDER BY"));
    assert!(log.contains("DESC"));
    assert!(log.contains("LIMIT"));
    assert!(log.contains("OFFSET"));
}

#[tokio::test]
async fn test_save_inserts_when_row_is_new() {
    let row = model("fresh", 3);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // UPDATE ... RETURNING finds nothing, then INSERT ... RETURNING
        .append_query_results(vec![Vec::<post::Model>::new(), vec![row.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = row.clone().into();

    let saved: Post = repo.save(post).await.unwrap();

    assert_eq!(saved.short_id, "fresh");
    assert_eq!(saved.id, row.id);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
