//! Server-rendered pages

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Html,
};
use daisy_common::db::{blog_status, get_blog, get_report, list_blogs, list_posts};
use tracing::debug;

use crate::error::{ApiError, PageError};
use crate::render::pages::{index_page, report_page};
use crate::render::CardList;
use crate::AppState;

/// GET /
pub async fn serve_index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let blogs = list_blogs(&state.db).await?;

    let mut rows = Vec::with_capacity(blogs.len());
    for blog in blogs {
        let status = blog_status(&state.db, blog.id).await?;
        rows.push((blog, status));
    }

    Ok(Html(index_page(&rows).into_string()))
}

/// GET /report/:report_id
///
/// Post cards are built in collection order, then put newest first by the
/// recency engine before rendering.
pub async fn view_report(
    State(state): State<AppState>,
    report_id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, PageError> {
    let Path(report_id) = report_id?;
    let report = get_report(&state.db, report_id).await?;
    let blog = get_blog(&state.db, report.blog_id).await?;
    let posts = list_posts(&state.db, blog.id).await?;

    let mut cards = CardList::from_posts(&posts);
    let outcome = state.engine.apply(&mut cards);
    debug!(report_id, cards = cards.len(), ?outcome, "Ordered report post cards");

    Ok(Html(report_page(&blog, &report, &cards).into_string()))
}

/// Fallback for unknown paths
pub async fn not_found_page() -> PageError {
    PageError(ApiError::NotFound("page".to_string()))
}
