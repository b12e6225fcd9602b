//! Blog URL validation and blog id extraction
//!
//! Supported shapes:
//! - `https://blog.naver.com/{id}` (optionally followed by `/{logNo}`)
//! - `https://m.blog.naver.com/{id}`
//! - `https://{id}.blog.me/...`
//! - `https://blog.naver.com/PostView.naver?blogId={id}&logNo={logNo}`
//! - `https://blog.naver.com/PostList.naver?blogId={id}`
//!
//! The scheme may be omitted and host matching is case-insensitive.

use url::Url;

use crate::{Error, Result};

const BLOG_HOSTS: [&str; 2] = ["blog.naver.com", "m.blog.naver.com"];

/// First path segments that are platform pages, not blog ids
const RESERVED_SEGMENTS: [&str; 6] = [
    "PostView.naver",
    "PostList.naver",
    "SympathyUpdateCenter.naver",
    "CommentList.naver",
    "api",
    "BlogTagCloud.naver",
];

/// Extract the blog (account) id from a blog URL
///
/// # Errors
/// [`Error::InvalidInput`] when the URL is empty, is not a blog URL, or carries
/// no blog id.
///
/// # Examples
/// ```
/// use daisy_common::blog_url::extract_blog_id;
///
/// assert_eq!(extract_blog_id("https://blog.naver.com/myid/223456789").unwrap(), "myid");
/// assert_eq!(extract_blog_id("myid.blog.me").unwrap(), "myid");
/// assert!(extract_blog_id("https://www.google.com").is_err());
/// ```
pub fn extract_blog_id(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput("Blog URL is empty".to_string()));
    }

    let normalized = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let parsed = Url::parse(&normalized)
        .map_err(|e| Error::InvalidInput(format!("Malformed blog URL {}: {}", raw, e)))?;
    // Url lowercases the host
    let host = parsed.host_str().unwrap_or_default().to_string();

    if let Some(id) = host.strip_suffix(".blog.me") {
        if !id.is_empty() && !id.contains('.') {
            return Ok(id.to_string());
        }
    }

    if BLOG_HOSTS.contains(&host.as_str()) {
        if let Some(id) = blog_id_query_param(&parsed) {
            return Ok(id);
        }

        let first_segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .unwrap_or_default();

        if first_segment.is_empty() {
            return Err(Error::InvalidInput(format!("No blog id in URL: {}", raw)));
        }
        if RESERVED_SEGMENTS.contains(&first_segment) {
            return Err(Error::InvalidInput(format!(
                "Platform page URL without blogId parameter: {}",
                raw
            )));
        }
        return Ok(first_segment.to_string());
    }

    Err(Error::InvalidInput(format!("Not a supported blog URL: {}", raw)))
}

/// Whether the URL is a blog URL with an extractable id
pub fn is_blog_url(raw: &str) -> bool {
    extract_blog_id(raw).is_ok()
}

/// `blogId` query parameter, matched case-insensitively
fn blog_id_query_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key.eq_ignore_ascii_case("blogid") && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
