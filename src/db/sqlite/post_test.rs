//! Tests for SqlitePostRepository.

use crate::db::{Database, DbError, PostInput, PostRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn post_create_and_get() {
    let db = setup_db().await;
    let posts = db.posts();

    let input = PostInput::new(
        "my-first-post",
        "My First Post",
        "# Heading\n\nWith *some* markdown.",
    );
    let created = posts.create(&input).await.expect("Create should succeed");
    assert_eq!(created.slug, "my-first-post");
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = posts
        .get("my-first-post")
        .await
        .expect("Get should succeed")
        .expect("Post should exist");
    assert_eq!(retrieved.slug, input.slug);
    assert_eq!(retrieved.title, input.title);
    assert_eq!(retrieved.markdown, input.markdown);
    assert_eq!(retrieved.created_at, created.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn post_get_nonexistent_returns_none() {
    let db = setup_db().await;

    let result = db.posts().get("nope").await.expect("Get should succeed");
    assert!(result.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn post_create_preserves_unusual_field_values() {
    let db = setup_db().await;
    let posts = db.posts();

    let input = PostInput::new("  spaced slug ", "Ünïcödé <title>", " \n ");
    posts.create(&input).await.unwrap();

    let retrieved = posts.get("  spaced slug ").await.unwrap().unwrap();
    assert_eq!(retrieved.title, "Ünïcödé <title>");
    assert_eq!(retrieved.markdown, " \n ");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_create_duplicate_slug_is_already_exists() {
    let db = setup_db().await;
    let posts = db.posts();

    posts
        .create(&PostInput::new("dup", "First", "one"))
        .await
        .unwrap();
    let result = posts.create(&PostInput::new("dup", "Second", "two")).await;

    assert!(matches!(result, Err(DbError::AlreadyExists { ref id, .. }) if id == "dup"));

    // The original record is untouched
    let post = posts.get("dup").await.unwrap().unwrap();
    assert_eq!(post.title, "First");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_list_returns_projections() {
    let db = setup_db().await;
    let posts = db.posts();

    // Initially empty
    assert!(posts.list().await.expect("List should succeed").is_empty());

    posts
        .create(&PostInput::new("first", "First", "Content one"))
        .await
        .unwrap();
    posts
        .create(&PostInput::new("second", "Second", "Content two"))
        .await
        .unwrap();

    let items = posts.list().await.expect("List should succeed");
    assert_eq!(items.len(), 2);

    let mut slugs: Vec<&str> = items.iter().map(|p| p.slug.as_str()).collect();
    slugs.sort();
    assert_eq!(slugs, vec!["first", "second"]);

    let first = items.iter().find(|p| p.slug == "first").unwrap();
    assert_eq!(first.title, "First");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_update_overwrites_title_and_markdown() {
    let db = setup_db().await;
    let posts = db.posts();

    let created = posts
        .create(&PostInput::new("upd", "Original Title", "Original content"))
        .await
        .unwrap();

    let updated = posts
        .update(&PostInput::new("upd", "Updated Title", "Updated content"))
        .await
        .expect("Update should succeed");
    assert_eq!(updated.slug, "upd");
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.created_at, created.created_at);

    let retrieved = posts.get("upd").await.unwrap().unwrap();
    assert_eq!(retrieved.title, "Updated Title");
    assert_eq!(retrieved.markdown, "Updated content");

    assert_eq!(posts.list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn post_update_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db
        .posts()
        .update(&PostInput::new("ghost", "Title", "Body"))
        .await;
    assert!(matches!(result, Err(DbError::NotFound { ref id, .. }) if id == "ghost"));
    assert!(db.posts().get("ghost").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn post_delete() {
    let db = setup_db().await;
    let posts = db.posts();

    posts
        .create(&PostInput::new("del", "To Delete", "Will be deleted"))
        .await
        .unwrap();

    posts.delete("del").await.expect("Delete should succeed");

    assert!(posts.get("del").await.unwrap().is_none());
    assert!(posts.list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn post_delete_twice_returns_not_found() {
    let db = setup_db().await;
    let posts = db.posts();

    posts
        .create(&PostInput::new("once", "Once", "body"))
        .await
        .unwrap();
    posts.delete("once").await.unwrap();

    let result = posts.delete("once").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
