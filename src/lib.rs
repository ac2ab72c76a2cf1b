//! # Ringkas
//!
//! Summarise the article paragraphs or linked pages of a webpage with the Gemini API.
//!
//! ## Features
//!
//! - **Extraction**: paragraphs of a page's `<article>`, or its links resolved to absolute URLs
//! - **Summaries**: one Gemini `generateContent` call per extracted item, failures isolated per item
//! - **Two front ends**: a terminal CLI with interactive prompts and a browser form served by axum

pub mod config;
pub mod link;
pub mod logging;
pub mod pipeline;
pub mod scraper;
pub mod summarizer;
pub mod summary;
pub mod ui;
pub mod web;

pub use config::Config;
pub use pipeline::{PipelineError, SummaryRequest};
pub use crate::scraper::{ExtractMode, ExtractedItem, Fetcher};
pub use summarizer::Summarizer;
pub use summary::{Report, SummaryOutcome};
