//! Summary types - the output of one summarization run.

use crate::scraper::{ExtractMode, ExtractedItem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// What became of a single item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum SummaryOutcome {
    /// Summary text, or the placeholder when the API returned none
    Summary(String),
    /// Why no summary could be produced
    Failed(String),
}

impl SummaryOutcome {
    pub fn is_summary(&self) -> bool {
        matches!(self, SummaryOutcome::Summary(_))
    }
}

/// An extracted item together with its outcome
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub label: String,
    pub item: ExtractedItem,
    pub outcome: SummaryOutcome,
}

/// Everything produced for one page
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub page: Url,
    pub title: Option<String>,
    pub mode: ExtractMode,
    pub items: Vec<ItemReport>,
    pub finished_at: DateTime<Utc>,
}

impl Report {
    /// Number of items that produced a summary
    pub fn summarized(&self) -> usize {
        self.items.iter().filter(|r| r.outcome.is_summary()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.summarized()
    }
}
