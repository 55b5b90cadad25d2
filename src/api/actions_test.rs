//! Tests for the shared post action.

use crate::api::actions::{ActionOutcome, submit};
use crate::api::{ADMIN_PATH, PostForm, RouteError};
use crate::db::{Database, PostInput, PostRepository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn form(pairs: &[(&str, &str)]) -> PostForm {
    let mut form = PostForm::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "title" => form.title = value,
            "slug" => form.slug = value,
            "markdown" => form.markdown = value,
            "intent" => form.intent = value,
            other => panic!("unknown field {}", other),
        }
    }
    form
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_returns_submitted_fields() {
    let db = setup_db().await;

    let outcome = submit(
        &db,
        "new",
        form(&[
            ("title", "Hello"),
            ("slug", "hello"),
            ("markdown", "# Hi"),
            ("intent", "create"),
        ]),
    )
    .await
    .unwrap();
    assert_eq!(outcome, ActionOutcome::Redirect(ADMIN_PATH));

    let post = db.posts().get("hello").await.unwrap().unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.slug, "hello");
    assert_eq!(post.markdown, "# Hi");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_writes_nothing() {
    let db = setup_db().await;

    let outcome = submit(
        &db,
        "new",
        form(&[("title", "Hello"), ("slug", "hello"), ("intent", "create")]),
    )
    .await
    .unwrap();

    match outcome {
        ActionOutcome::Invalid(errors) => {
            assert_eq!(errors.markdown, "Markdown is required");
            assert!(errors.title.is_empty());
            assert!(errors.slug.is_empty());
        }
        other => panic!("expected validation errors, got {:?}", other),
    }
    assert!(db.posts().list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites_title_and_markdown() {
    let db = setup_db().await;
    db.posts()
        .create(&PostInput::new("hello", "Hello", "# Hi"))
        .await
        .unwrap();

    // The slug input is disabled on the edit form, so it is not sent
    let outcome = submit(
        &db,
        "hello",
        form(&[
            ("title", "Hello again"),
            ("markdown", "## Changed"),
            ("intent", "update"),
        ]),
    )
    .await
    .unwrap();
    assert_eq!(outcome, ActionOutcome::Redirect(ADMIN_PATH));

    let post = db.posts().get("hello").await.unwrap().unwrap();
    assert_eq!(post.title, "Hello again");
    assert_eq!(post.markdown, "## Changed");
    assert_eq!(db.posts().list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_post() {
    let db = setup_db().await;
    db.posts()
        .create(&PostInput::new("hello", "Hello", "# Hi"))
        .await
        .unwrap();

    let outcome = submit(
        &db,
        "hello",
        form(&[("slug", "hello"), ("intent", "delete")]),
    )
    .await
    .unwrap();
    assert_eq!(outcome, ActionOutcome::Redirect(ADMIN_PATH));
    assert!(db.posts().get("hello").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_intent_is_bad_request_and_writes_nothing() {
    let db = setup_db().await;

    let result = submit(
        &db,
        "new",
        form(&[
            ("title", "Hello"),
            ("slug", "hello"),
            ("markdown", "# Hi"),
            ("intent", "publish"),
        ]),
    )
    .await;

    assert!(matches!(result, Err(RouteError::BadRequest { .. })));
    assert!(db.posts().list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_create_is_conflict() {
    let db = setup_db().await;
    let payload = [
        ("title", "Hello"),
        ("slug", "hello"),
        ("markdown", "# Hi"),
        ("intent", "create"),
    ];

    submit(&db, "new", form(&payload)).await.unwrap();
    let second = submit(&db, "new", form(&payload)).await;

    assert!(matches!(second, Err(RouteError::Conflict { .. })));
    assert_eq!(db.posts().list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_is_not_found() {
    let db = setup_db().await;
    db.posts()
        .create(&PostInput::new("hello", "Hello", "# Hi"))
        .await
        .unwrap();
    let payload = [("slug", "hello"), ("intent", "delete")];

    submit(&db, "hello", form(&payload)).await.unwrap();
    let second = submit(&db, "hello", form(&payload)).await;

    assert!(matches!(second, Err(RouteError::NotFound { ref slug }) if slug == "hello"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_post_is_not_found() {
    let db = setup_db().await;

    let result = submit(
        &db,
        "ghost",
        form(&[
            ("title", "Boo"),
            ("markdown", "nothing here"),
            ("intent", "update"),
        ]),
    )
    .await;

    assert!(matches!(result, Err(RouteError::NotFound { .. })));
    assert!(db.posts().get("ghost").await.unwrap().is_none());
}
