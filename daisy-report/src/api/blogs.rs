//! Blog ingestion and report storage
//!
//! Posts are collected elsewhere and submitted here as JSON; the analyzer
//! posts its report once it has one.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use daisy_common::blog_url::extract_blog_id;
use daisy_common::db::{
    get_blog, insert_blog_with_posts, insert_report, list_posts, BlogPost, NewPost,
    ReportSections,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Body of POST /api/blogs
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub blog_url: String,
    #[serde(default)]
    pub posts: Vec<NewPost>,
}

#[derive(Debug, Serialize)]
pub struct CreateBlogResponse {
    pub blog_id: i64,
    pub account_id: String,
    pub post_count: usize,
}

/// POST /api/blogs
///
/// Validates the blog URL, then stores the blog and its posts.
pub async fn create_blog(
    State(state): State<AppState>,
    request: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateBlogResponse>), ApiError> {
    let Json(request) = request?;
    let account_id = extract_blog_id(&request.blog_url)?;

    if request.posts.is_empty() {
        return Err(ApiError::BadRequest(
            "No posts found or unable to access the blog".to_string(),
        ));
    }
    let (blog, post_count) =
        insert_blog_with_posts(&state.db, request.blog_url.trim(), &account_id, &request.posts)
            .await?;

    info!(
        blog_id = blog.id,
        account_id = %account_id,
        post_count,
        "Blog submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateBlogResponse {
            blog_id: blog.id,
            account_id,
            post_count,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct BlogPostsResponse {
    pub blog_id: i64,
    /// Newest first
    pub posts: Vec<BlogPost>,
}

/// GET /api/blogs/:blog_id/posts
pub async fn list_blog_posts(
    State(state): State<AppState>,
    blog_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BlogPostsResponse>, ApiError> {
    let Path(blog_id) = blog_id?;
    get_blog(&state.db, blog_id).await?;

    let posts = list_posts(&state.db, blog_id).await?;
    let posts = state.engine.sort_by_recency(posts, BlogPost::record);

    Ok(Json(BlogPostsResponse { blog_id, posts }))
}

#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub report_id: i64,
}

/// POST /api/blogs/:blog_id/report
///
/// 409 when the blog already has a report.
pub async fn create_report(
    State(state): State<AppState>,
    blog_id: Result<Path<i64>, PathRejection>,
    sections: Result<Json<ReportSections>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReportResponse>), ApiError> {
    let Path(blog_id) = blog_id?;
    let Json(sections) = sections?;
    let report = insert_report(&state.db, blog_id, &sections).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            report_id: report.id,
        }),
    ))
}
