//! Blog and post queries

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use super::models::{Blog, BlogPost, NewPost};
use crate::{Error, Result};

/// Record a submitted blog
pub async fn insert_blog(pool: &SqlitePool, url: &str, account_id: &str) -> Result<Blog> {
    let id = sqlx::query("INSERT INTO blogs (url, account_id) VALUES (?, ?)")
        .bind(url)
        .bind(account_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    get_blog(pool, id).await
}

/// Fetch a blog by row id
pub async fn get_blog(pool: &SqlitePool, id: i64) -> Result<Blog> {
    sqlx::query_as::<_, Blog>(
        "SELECT id, url, account_id, created_at FROM blogs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("blog {}", id)))
}

/// All blogs, most recently submitted first
pub async fn list_blogs(pool: &SqlitePool) -> Result<Vec<Blog>> {
    let blogs = sqlx::query_as::<_, Blog>(
        "SELECT id, url, account_id, created_at FROM blogs ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(blogs)
}

/// Record a submitted blog together with its posts
///
/// Both inserts share one transaction; when any post is rejected nothing is
/// stored.
pub async fn insert_blog_with_posts(
    pool: &SqlitePool,
    url: &str,
    account_id: &str,
    posts: &[NewPost],
) -> Result<(Blog, usize)> {
    let mut tx = pool.begin().await?;

    let blog_id = sqlx::query("INSERT INTO blogs (url, account_id) VALUES (?, ?)")
        .bind(url)
        .bind(account_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    write_posts(&mut *tx, blog_id, posts).await?;

    tx.commit().await?;
    debug!(blog_id, count = posts.len(), "Stored blog with posts");

    Ok((get_blog(pool, blog_id).await?, posts.len()))
}

/// Store posts for a blog in one transaction
///
/// Returns the number of rows written.
pub async fn insert_posts(pool: &SqlitePool, blog_id: i64, posts: &[NewPost]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    write_posts(&mut *tx, blog_id, posts).await?;
    tx.commit().await?;
    debug!(blog_id, count = posts.len(), "Stored blog posts");

    Ok(posts.len())
}

async fn write_posts(conn: &mut SqliteConnection, blog_id: i64, posts: &[NewPost]) -> Result<()> {
    for post in posts {
        let log_no = post
            .log_no
            .map(i64::try_from)
            .transpose()
            .map_err(|_| Error::InvalidInput(format!("log_no out of range in post {:?}", post.title)))?;

        sqlx::query(
            r#"
            INSERT INTO blog_posts (blog_id, title, content, date, url, log_no, is_private)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(blog_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.date.as_deref())
        .bind(post.url.as_deref())
        .bind(log_no)
        .bind(post.is_private)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Posts for a blog in collection order
///
/// Display order is decided by the recency engine, not by this query.
pub async fn list_posts(pool: &SqlitePool, blog_id: i64) -> Result<Vec<BlogPost>> {
    let posts = sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT id, blog_id, title, content, date, url, log_no, is_private, created_at
        FROM blog_posts
        WHERE blog_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn count_posts(pool: &SqlitePool, blog_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE blog_id = ?")
        .bind(blog_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
