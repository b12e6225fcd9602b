//! Report and status queries

use sqlx::SqlitePool;
use tracing::info;

use super::models::{BlogStatus, Report, ReportSections};
use super::posts::{count_posts, get_blog};
use crate::{time, Error, Result};

const REPORT_COLUMNS: &str = "id, blog_id, characteristics, strengths, weaknesses, \
     thinking_patterns, decision_making, unconscious_biases, advice, created_at";

/// Fetch a report by row id
pub async fn get_report(pool: &SqlitePool, id: i64) -> Result<Report> {
    sqlx::query_as::<_, Report>(&format!("SELECT {} FROM reports WHERE id = ?", REPORT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("report {}", id)))
}

/// The report for a blog, if one has been stored
pub async fn find_report_for_blog(pool: &SqlitePool, blog_id: i64) -> Result<Option<Report>> {
    let report = sqlx::query_as::<_, Report>(&format!(
        "SELECT {} FROM reports WHERE blog_id = ?",
        REPORT_COLUMNS
    ))
    .bind(blog_id)
    .fetch_optional(pool)
    .await?;

    Ok(report)
}

/// Store the report for a blog
///
/// Fails with [`Error::NotFound`] for an unknown blog and [`Error::Conflict`]
/// when the blog already has a report. The unique index on `blog_id` decides
/// the winner when two submissions race.
pub async fn insert_report(
    pool: &SqlitePool,
    blog_id: i64,
    sections: &ReportSections,
) -> Result<Report> {
    get_blog(pool, blog_id).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO reports (
            blog_id, characteristics, strengths, weaknesses, thinking_patterns,
            decision_making, unconscious_biases, advice, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(blog_id) DO NOTHING
        "#,
    )
    .bind(blog_id)
    .bind(sections.characteristics.as_deref())
    .bind(sections.strengths.as_deref())
    .bind(sections.weaknesses.as_deref())
    .bind(sections.thinking_patterns.as_deref())
    .bind(sections.decision_making.as_deref())
    .bind(sections.unconscious_biases.as_deref())
    .bind(sections.advice.as_deref())
    .bind(time::report_timestamp())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let existing = find_report_for_blog(pool, blog_id).await?;
        return Err(Error::Conflict(match existing {
            Some(report) => format!("blog {} already has report {}", blog_id, report.id),
            None => format!("blog {} already has a report", blog_id),
        }));
    }

    let id = result.last_insert_rowid();
    info!(blog_id, report_id = id, "Stored report");
    get_report(pool, id).await
}

/// Post count and report readiness for a blog
pub async fn blog_status(pool: &SqlitePool, blog_id: i64) -> Result<BlogStatus> {
    get_blog(pool, blog_id).await?;

    let post_count = count_posts(pool, blog_id).await?;
    let report_id = find_report_for_blog(pool, blog_id).await?.map(|r| r.id);

    Ok(BlogStatus {
        post_count,
        has_report: report_id.is_some(),
        report_id,
    })
}
