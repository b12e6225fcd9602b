//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Format used for report creation timestamps
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time rendered as `YYYY-MM-DD HH:MM:SS`, the form stored in
/// `reports.created_at`
pub fn report_timestamp() -> String {
    format_report_timestamp(&now())
}

/// Render an arbitrary instant in the report timestamp format
pub fn format_report_timestamp(at: &DateTime<Utc>) -> String {
    at.format(REPORT_TIMESTAMP_FORMAT).to_string()
}
