//! Database models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::recency::PostRecord;

/// A submitted blog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    /// URL as submitted
    pub url: String,
    /// Platform account id extracted from the URL
    pub account_id: String,
    pub created_at: String,
}

/// A collected post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub content: String,
    /// Date text as displayed by the blog
    pub date: Option<String>,
    pub url: Option<String>,
    pub log_no: Option<i64>,
    pub is_private: bool,
    pub created_at: String,
}

impl BlogPost {
    /// Ordering inputs for this post's card
    pub fn record(&self) -> PostRecord {
        PostRecord::new(
            self.date.clone().unwrap_or_default(),
            self.url.clone().unwrap_or_default(),
            self.log_no.and_then(|n| u64::try_from(n).ok()),
        )
    }
}

/// Post as submitted for ingestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub log_no: Option<u64>,
    #[serde(default)]
    pub is_private: bool,
}

/// A stored analysis report
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: i64,
    pub blog_id: i64,
    pub characteristics: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub thinking_patterns: Option<String>,
    pub decision_making: Option<String>,
    pub unconscious_biases: Option<String>,
    pub advice: Option<String>,
    pub created_at: String,
}

impl Report {
    /// Section titles paired with their text, in display order
    pub fn sections(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Characteristics", self.characteristics.as_deref()),
            ("Strengths", self.strengths.as_deref()),
            ("Weaknesses", self.weaknesses.as_deref()),
            ("Thinking Patterns", self.thinking_patterns.as_deref()),
            ("Decision Making", self.decision_making.as_deref()),
            ("Unconscious Biases", self.unconscious_biases.as_deref()),
            ("Advice", self.advice.as_deref()),
        ]
    }
}

/// Report content as submitted by the analyzer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSections {
    pub characteristics: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub thinking_patterns: Option<String>,
    pub decision_making: Option<String>,
    pub unconscious_biases: Option<String>,
    pub advice: Option<String>,
}

/// Readiness snapshot served by the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogStatus {
    pub post_count: i64,
    pub has_report: bool,
    pub report_id: Option<i64>,
}
