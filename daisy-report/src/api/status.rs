//! Report readiness endpoint polled by the submission page

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use daisy_common::db::{blog_status, BlogStatus};

use crate::error::ApiError;
use crate::AppState;

/// GET /status/:blog_id
///
/// Returns `{post_count, has_report, report_id}`; 404 for an unknown blog.
pub async fn get_status(
    State(state): State<AppState>,
    blog_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BlogStatus>, ApiError> {
    let Path(blog_id) = blog_id?;
    Ok(Json(blog_status(&state.db, blog_id).await?))
}
