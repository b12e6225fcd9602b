//! Post recency ordering
//!
//! Post cards are displayed newest first. Recency comes from two signals:
//! the platform's monotonically assigned log number, and the date text shown
//! on the card. The log number is authoritative; the date is only consulted
//! when no log number can be found.
//!
//! - [`log_no`]: log number extraction from URLs and explicit attributes
//! - [`ordering`]: the ordering engine and the [`CardContainer`] adapter seam

pub mod log_no;
pub mod ordering;

use serde::{Deserialize, Serialize};

use crate::dates::try_parse_display_date;

pub use ordering::{CardContainer, OrderingEngine, ReorderOutcome};

/// Ordering inputs for one displayed post
///
/// Built fresh for every render from the card's markup (or the stored post
/// row); never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Date text as displayed on the card (may be empty)
    pub displayed_date: String,
    /// Link to the post on the blog platform
    pub url: String,
    /// Log number supplied out-of-band, if any
    pub identifier: Option<u64>,
}

impl PostRecord {
    pub fn new(
        displayed_date: impl Into<String>,
        url: impl Into<String>,
        identifier: Option<u64>,
    ) -> Self {
        Self {
            displayed_date: displayed_date.into(),
            url: url.into(),
            identifier,
        }
    }

    /// Record carrying only a URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(String::new(), url, None)
    }
}

/// Derived ordering key
///
/// Variant order is significant: the derived `Ord` ranks any identifier above
/// any date, and any date above a missing key. Larger keys are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SortKey {
    /// No strategy produced a key
    Missing,
    /// Milliseconds since the epoch, from the displayed date
    Dated(i64),
    /// Platform log number
    Identified(u64),
}

/// One way of deriving a [`SortKey`] from a record
pub trait KeyStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns `None` when this strategy has nothing to say about the record
    fn derive(&self, record: &PostRecord) -> Option<SortKey>;
}

/// Log number from the explicit attribute or the URL
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierStrategy;

impl KeyStrategy for IdentifierStrategy {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn derive(&self, record: &PostRecord) -> Option<SortKey> {
        match log_no::extract_log_no(&record.url, record.identifier) {
            0 => None,
            id => Some(SortKey::Identified(id)),
        }
    }
}

/// Timestamp parsed from the displayed date text
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayDateStrategy;

impl KeyStrategy for DisplayDateStrategy {
    fn name(&self) -> &'static str {
        "display_date"
    }

    fn derive(&self, record: &PostRecord) -> Option<SortKey> {
        try_parse_display_date(&record.displayed_date).map(SortKey::Dated)
    }
}

/// Named strategy chains selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    /// Log number only; undated and unnumbered posts keep their relative order at the end
    Identifier,
    /// Log number, falling back to the displayed date
    #[default]
    IdentifierThenDate,
    /// Displayed date only
    Date,
}

impl OrderingStrategy {
    /// Strategies to try, highest priority first
    pub fn chain(self) -> Vec<Box<dyn KeyStrategy>> {
        match self {
            OrderingStrategy::Identifier => vec![Box::new(IdentifierStrategy)],
            OrderingStrategy::IdentifierThenDate => {
                vec![Box::new(IdentifierStrategy), Box::new(DisplayDateStrategy)]
            }
            OrderingStrategy::Date => vec![Box::new(DisplayDateStrategy)],
        }
    }
}
