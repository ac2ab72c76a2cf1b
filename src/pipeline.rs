//! Request validation and the extract-then-summarize pipeline.
//!
//! Input is request-scoped: nothing here holds state between runs. Items are
//! summarized one after another and a failing item never stops the rest.

use crate::link;
use crate::scraper::{ExtractMode, ExtractedItem, FetchError, Fetcher};
use crate::summarizer::Summarizer;
use crate::summary::{ItemReport, Report, SummaryOutcome};
use chrono::Utc;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter both the webpage URL and Gemini API key.")]
    MissingFields,
    #[error("The entered URL is not valid: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("An error occurred while fetching the webpage: {0}")]
    Fetch(#[from] FetchError),
    #[error("No items found in the provided webpage.")]
    NoItems,
}

/// Raw user input for one run
#[derive(Debug, Clone, Default)]
pub struct SummaryRequest {
    pub page_url: String,
    pub api_key: String,
    pub mode: ExtractMode,
}

/// Input that passed validation
#[derive(Debug, Clone)]
pub struct ValidRequest {
    pub page: Url,
    pub api_key: String,
    pub mode: ExtractMode,
}

impl SummaryRequest {
    pub fn new(page_url: impl Into<String>, api_key: impl Into<String>, mode: ExtractMode) -> Self {
        Self {
            page_url: page_url.into(),
            api_key: api_key.into(),
            mode,
        }
    }

    /// Check required fields and normalize the page URL
    pub fn validate(&self) -> Result<ValidRequest, InputError> {
        let api_key = self.api_key.trim();
        if self.page_url.trim().is_empty() || api_key.is_empty() {
            return Err(InputError::MissingFields);
        }

        let normalized = link::normalize_page_url(&self.page_url);
        let page = link::parse_valid(&normalized).ok_or(InputError::InvalidUrl(normalized))?;

        Ok(ValidRequest {
            page,
            api_key: api_key.to_string(),
            mode: self.mode,
        })
    }
}

/// Validate, extract, then summarize every item in order
pub async fn run(
    fetcher: &Fetcher,
    summarizer: &Summarizer,
    request: &SummaryRequest,
) -> Result<Report, PipelineError> {
    let request = request.validate()?;
    tracing::info!(url = %request.page, mode = %request.mode, "summarizing page");

    let extraction = fetcher.try_extract(&request.page, request.mode).await?;
    if extraction.items.is_empty() {
        return Err(PipelineError::NoItems);
    }

    let mut items = Vec::with_capacity(extraction.items.len());
    for (index, item) in extraction.items.into_iter().enumerate() {
        let label = item.label(index);
        let result = match &item {
            ExtractedItem::Paragraph(text) => summarizer.summarize_text(text, &request.api_key).await,
            ExtractedItem::Link(url) => {
                summarizer
                    .summarize_document(fetcher, url, &request.api_key)
                    .await
            }
        };

        let outcome = match result {
            Ok(summary) => SummaryOutcome::Summary(summary),
            Err(e) => SummaryOutcome::Failed(e.to_string()),
        };
        tracing::debug!(%label, ok = outcome.is_summary(), "item done");
        items.push(ItemReport {
            label,
            item,
            outcome,
        });
    }

    let report = Report {
        page: extraction.page,
        title: extraction.title,
        mode: request.mode,
        items,
        finished_at: Utc::now(),
    };
    tracing::info!(
        summarized = report.summarized(),
        failed = report.failed(),
        "page done"
    );
    Ok(report)
}
