//! SQLite PostRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, Post, PostInput, PostListItem, PostRepository};

/// SQLx-backed post repository.
pub struct SqlitePostRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        slug: row.get("slug"),
        title: row.get("title"),
        markdown: row.get("markdown"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

impl<'a> PostRepository for SqlitePostRepository<'a> {
    async fn list(&self) -> DbResult<Vec<PostListItem>> {
        let rows = sqlx::query("SELECT slug, title FROM post ORDER BY created_at, rowid")
            .fetch_all(self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|row| PostListItem {
                slug: row.get("slug"),
                title: row.get("title"),
            })
            .collect())
    }

    async fn get(&self, slug: &str) -> DbResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT slug, title, markdown, created_at, updated_at FROM post WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.as_ref().map(post_from_row))
    }

    async fn create(&self, input: &PostInput) -> DbResult<Post> {
        let now = now();

        sqlx::query(
            r#"
            INSERT INTO post (slug, title, markdown, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.markdown)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db_err) if db_err.is_unique_violation()
            );
            if duplicate {
                DbError::AlreadyExists {
                    entity_type: "Post".to_string(),
                    id: input.slug.clone(),
                }
            } else {
                database_error(e)
            }
        })?;

        Ok(Post {
            slug: input.slug.clone(),
            title: input.title.clone(),
            markdown: input.markdown.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn update(&self, input: &PostInput) -> DbResult<Post> {
        let row = sqlx::query(
            r#"
            UPDATE post
            SET title = ?, markdown = ?, updated_at = ?
            WHERE slug = ?
            RETURNING slug, title, markdown, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.markdown)
        .bind(now())
        .bind(&input.slug)
        .fetch_optional(self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref()
            .map(post_from_row)
            .ok_or_else(|| DbError::post_not_found(&input.slug))
    }

    async fn delete(&self, slug: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM post WHERE slug = ?")
            .bind(slug)
            .execute(self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::post_not_found(slug));
        }

        Ok(())
    }
}
