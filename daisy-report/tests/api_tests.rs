//! Integration tests for daisy-report HTTP routes
//!
//! Every test runs the router against its own temporary database through
//! `tower::ServiceExt::oneshot`, so no listener is bound.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use daisy_common::config::ServiceConfig;
use daisy_common::db::init_database;
use daisy_common::recency::OrderingStrategy;
use daisy_report::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: app over a fresh database
async fn setup_app() -> (TempDir, SqlitePool, Router) {
    setup_app_with(ServiceConfig::default()).await
}

async fn setup_app_with(config: ServiceConfig) -> (TempDir, SqlitePool, Router) {
    let dir = TempDir::new().expect("temp dir");
    let pool = init_database(&dir.path().join("daisy.db"))
        .await
        .expect("database init");
    let app = build_router(AppState::new(pool.clone(), &config));
    (dir, pool, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_str(&read_body(body).await).expect("Should parse JSON")
}

fn sample_blog() -> Value {
    json!({
        "blog_url": "https://blog.naver.com/myid",
        "posts": [
            {
                "title": "Oldest",
                "content": "first post",
                "date": "2024. 1. 2.",
                "url": "https://blog.naver.com/myid/223840700000"
            },
            {
                "title": "Newest",
                "content": "third post",
                "date": "2024. 3. 1.",
                "url": "https://blog.naver.com/myid/223840700500"
            },
            {
                "title": "Middle",
                "content": "second post",
                "date": "2024. 2. 1.",
                "url": "https://m.blog.naver.com/PostView.naver?blogId=myid&logNo=223840700250"
            }
        ]
    })
}

/// Submit the sample blog and return its id
async fn create_sample_blog(app: &Router) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json("/api/blogs", sample_blog()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = extract_json(response.into_body()).await;
    body["blog_id"].as_i64().expect("blog_id")
}

async fn create_sample_report(app: &Router, blog_id: i64) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/blogs/{}/report", blog_id),
            json!({
                "characteristics": "Reflective <and> curious",
                "advice": "Write more often"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    extract_json(response.into_body()).await["report_id"]
        .as_i64()
        .expect("report_id")
}

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "daisy-report");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
}

// =============================================================================
// Blog submission
// =============================================================================

#[tokio::test]
async fn test_create_blog() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(post_json("/api/blogs", sample_blog()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["account_id"], "myid");
    assert_eq!(body["post_count"], 3);
}

#[tokio::test]
async fn test_create_blog_rejects_foreign_url() {
    let (_dir, _pool, app) = setup_app().await;

    let mut request = sample_blog();
    request["blog_url"] = json!("https://www.google.com");

    let response = app.oneshot(post_json("/api/blogs", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Not a supported blog URL"));
}

#[tokio::test]
async fn test_create_blog_requires_posts() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(post_json(
            "/api/blogs",
            json!({ "blog_url": "https://blog.naver.com/myid", "posts": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing stored
    assert!(daisy_common::db::list_blogs(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_blog_rejects_oversized_log_no() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(post_json(
            "/api/blogs",
            json!({
                "blog_url": "https://blog.naver.com/myid",
                "posts": [{ "title": "huge", "log_no": u64::MAX }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(daisy_common::db::list_blogs(&pool).await.unwrap().is_empty());
}

// =============================================================================
// Status endpoint
// =============================================================================

#[tokio::test]
async fn test_status_unknown_blog() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/status/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_status_before_and_after_report() {
    let (_dir, _pool, app) = setup_app().await;
    let blog_id = create_sample_blog(&app).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/status/{}", blog_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["post_count"], 3);
    assert_eq!(body["has_report"], false);
    assert!(body["report_id"].is_null());

    let report_id = create_sample_report(&app, blog_id).await;

    let response = app
        .oneshot(get(&format!("/status/{}", blog_id)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["has_report"], true);
    assert_eq!(body["report_id"], report_id);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_second_report_conflicts() {
    let (_dir, _pool, app) = setup_app().await;
    let blog_id = create_sample_blog(&app).await;
    create_sample_report(&app, blog_id).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/blogs/{}/report", blog_id),
            json!({ "advice": "again" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_report_for_unknown_blog() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(post_json("/api/blogs/5/report", json!({ "advice": "x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_posts_listed_newest_first() {
    let (_dir, _pool, app) = setup_app().await;
    let blog_id = create_sample_blog(&app).await;

    let response = app
        .oneshot(get(&format!("/api/blogs/{}/posts", blog_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_posts_for_unknown_blog() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/api/blogs/77/posts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_report_page_orders_cards() {
    let (_dir, _pool, app) = setup_app().await;
    let blog_id = create_sample_blog(&app).await;
    let report_id = create_sample_report(&app, blog_id).await;

    let response = app
        .oneshot(get(&format!("/report/{}", report_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = read_body(response.into_body()).await;
    assert!(html.contains("Self-Analysis Report"));
    assert!(html.contains("Reflective &lt;and&gt; curious"));
    assert!(html.contains("Analyzed Posts (3)"));

    let newest = html.find("Newest").unwrap();
    let middle = html.find("Middle").unwrap();
    let oldest = html.find("Oldest").unwrap();
    assert!(newest < middle && middle < oldest);
}

#[tokio::test]
async fn test_report_page_date_strategy() {
    let config = ServiceConfig {
        ordering: OrderingStrategy::Date,
        ..ServiceConfig::default()
    };
    let (_dir, _pool, app) = setup_app_with(config).await;

    // Log numbers disagree with dates; date ordering must win here
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/blogs",
            json!({
                "blog_url": "https://blog.naver.com/myid",
                "posts": [
                    { "title": "Earlier", "date": "2023년 5월 1일", "log_no": 900000000 },
                    { "title": "Later", "date": "2024-05-01", "log_no": 100000000 }
                ]
            }),
        ))
        .await
        .unwrap();
    let blog_id = extract_json(response.into_body()).await["blog_id"]
        .as_i64()
        .unwrap();
    let report_id = create_sample_report(&app, blog_id).await;

    let response = app
        .oneshot(get(&format!("/report/{}", report_id)))
        .await
        .unwrap();
    let html = read_body(response.into_body()).await;
    assert!(html.find("Later").unwrap() < html.find("Earlier").unwrap());
}

#[tokio::test]
async fn test_unknown_report_page() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/report/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = read_body(response.into_body()).await;
    assert!(html.contains("404 - Page Not Found"));
}

#[tokio::test]
async fn test_index_page_lists_blogs() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_body(response.into_body())
        .await
        .contains("No blogs have been submitted yet."));

    let blog_id = create_sample_blog(&app).await;
    let report_id = create_sample_report(&app, blog_id).await;

    let response = app.oneshot(get("/")).await.unwrap();
    let html = read_body(response.into_body()).await;
    assert!(html.contains("myid"));
    assert!(html.contains(&format!("/report/{}", report_id)));
}

#[tokio::test]
async fn test_unknown_path_renders_404() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response.into_body())
        .await
        .contains("404 - Page Not Found"));
}

// =============================================================================
// Malformed requests
// =============================================================================

#[tokio::test]
async fn test_non_numeric_report_id_renders_404_page() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get("/report/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(read_body(response.into_body())
        .await
        .contains("404 - Page Not Found"));
}

#[tokio::test]
async fn test_non_numeric_blog_id_returns_json_404() {
    let (_dir, _pool, app) = setup_app().await;

    for uri in ["/status/abc", "/api/blogs/abc/posts"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].is_string(), "{}", uri);
    }

    let response = app
        .oneshot(post_json("/api/blogs/abc/report", json!({ "advice": "x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(extract_json(response.into_body()).await["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_returns_json_400() {
    let (_dir, pool, app) = setup_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/blogs")
        .header("content-type", "application/json")
        .body(Body::from("{\"blog_url\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(extract_json(response.into_body()).await["error"].is_string());

    // Missing required field
    let response = app
        .oneshot(post_json("/api/blogs", json!({ "posts": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(extract_json(response.into_body()).await["error"].is_string());

    assert!(daisy_common::db::list_blogs(&pool).await.unwrap().is_empty());
}
