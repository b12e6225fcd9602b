//! Post identifier ("log number") extraction
//!
//! The blog platform assigns every post a monotonically increasing log number
//! and embeds it in the post URL, either as a `logNo=` query parameter or as
//! the last path segment. Larger numbers are newer posts.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum digit count for a trailing path segment to count as a log number
pub const MIN_PATH_LOG_NO_DIGITS: usize = 9;

/// `logNo=<digits>` as a whole query parameter
static QUERY_LOG_NO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]logNo=(\d+)").expect("query log number pattern is valid"));

/// Long numeric final path segment, optionally followed by one slash
static PATH_LOG_NO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"/(\d{{{},}})/?$", MIN_PATH_LOG_NO_DIGITS))
        .expect("path log number pattern is valid")
});

/// Derive a recency identifier for a post
///
/// An explicit, non-zero identifier wins. Otherwise the URL is searched for a
/// `logNo=` parameter, then for a trailing path segment of at least
/// [`MIN_PATH_LOG_NO_DIGITS`] digits. Returns 0 when nothing usable is found.
///
/// # Examples
/// ```
/// use daisy_common::recency::log_no::extract_log_no;
///
/// assert_eq!(extract_log_no("https://blog.naver.com/myid/223840700500", None), 223840700500);
/// assert_eq!(extract_log_no("https://m.blog.naver.com/PostView.naver?blogId=myid&logNo=100", None), 100);
/// assert_eq!(extract_log_no("https://blog.naver.com/myid/12345", None), 0);
/// assert_eq!(extract_log_no("https://blog.naver.com/myid/12345", Some(7)), 7);
/// ```
pub fn extract_log_no(url: &str, explicit: Option<u64>) -> u64 {
    if let Some(id) = explicit.filter(|id| *id != 0) {
        return id;
    }

    log_no_from_query(url)
        .or_else(|| log_no_from_path(url))
        .unwrap_or(0)
}

fn log_no_from_query(url: &str) -> Option<u64> {
    QUERY_LOG_NO
        .captures(url)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|id| *id != 0)
}

fn log_no_from_path(url: &str) -> Option<u64> {
    // Query strings and fragments never hold the path segment
    let path = url.split(['?', '#']).next().unwrap_or(url);
    PATH_LOG_NO
        .captures(path)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
