//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. A page yields an
//! ordered sequence of [`ExtractedItem`]s according to its [`ExtractMode`].

use crate::config::HttpConfig;
use crate::link;
use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use url::Url;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref H1: Selector = Selector::parse("h1").expect("valid selector");
    static ref ARTICLE: Selector = Selector::parse("article").expect("valid selector");
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("valid selector");
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("valid selector");
    static ref BASE: Selector = Selector::parse("base[href]").expect("valid selector");
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch {url}: server responded with {status}")]
    Status { url: String, status: StatusCode },
}

/// Which part of a page becomes the item sequence
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Paragraphs of the page's `<article>` element
    #[default]
    Article,
    /// Hyperlinks on the page, resolved to absolute URLs
    Links,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMode::Article => f.write_str("article"),
            ExtractMode::Links => f.write_str("links"),
        }
    }
}

/// One candidate for summarization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ExtractedItem {
    Paragraph(String),
    Link(Url),
}

impl ExtractedItem {
    /// Human-readable label; `index` is the item's zero-based position
    pub fn label(&self, index: usize) -> String {
        match self {
            ExtractedItem::Paragraph(_) => format!("paragraph {}", index + 1),
            ExtractedItem::Link(url) => url.to_string(),
        }
    }
}

/// Result of extracting a single page
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The page the items came from
    pub page: Url,
    /// Page title
    pub title: Option<String>,
    pub items: Vec<ExtractedItem>,
}

/// A fetched body and the URL it was finally served from
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Differs from the requested URL after redirects
    pub url: Url,
    pub body: String,
}

/// HTTP fetcher shared by the extractor and the summarizer.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a configured HTTP client for scraping
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET a URL and return its body as text
    pub async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError> {
        tracing::debug!(%url, "fetching");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let final_url = response.url().clone();
        if final_url != *url {
            tracing::debug!(from = %url, to = %final_url, "redirected");
        }
        let body = response.text().await.map_err(transport)?;
        Ok(Fetched {
            url: final_url,
            body,
        })
    }

    /// Fetch a page and extract its items, reporting failures to the caller
    pub async fn try_extract(&self, page: &Url, mode: ExtractMode) -> Result<Extraction, FetchError> {
        let fetched = self.fetch(page).await?;
        let extraction = parse_page(&fetched.body, &fetched.url, mode);
        tracing::debug!(url = %extraction.page, %mode, items = extraction.items.len(), "extracted");
        Ok(extraction)
    }

    /// Fetch a page and extract its items.
    ///
    /// Failures are logged and yield an empty sequence.
    pub async fn extract(&self, page: &Url, mode: ExtractMode) -> Vec<ExtractedItem> {
        match self.try_extract(page, mode).await {
            Ok(extraction) => extraction.items,
            Err(e) => {
                tracing::warn!("an error occurred while fetching the webpage: {}", e);
                Vec::new()
            }
        }
    }
}

/// Parse fetched HTML into an [`Extraction`].
///
/// `page` is the URL the HTML was served from; relative links resolve against it
/// unless the document declares a `<base href>`.
pub fn parse_page(html: &str, page: &Url, mode: ExtractMode) -> Extraction {
    let document = Html::parse_document(html);
    let items = match mode {
        ExtractMode::Article => extract_article_paragraphs(&document)
            .into_iter()
            .map(ExtractedItem::Paragraph)
            .collect(),
        ExtractMode::Links => extract_links(&document, page)
            .into_iter()
            .map(ExtractedItem::Link)
            .collect(),
    };

    Extraction {
        page: page.clone(),
        title: extract_title(&document),
        items,
    }
}

/// Article paragraphs joined by blank lines, or `None` when there are none
pub fn article_text(html: &str) -> Option<String> {
    let paragraphs = extract_article_paragraphs(&Html::parse_document(html));
    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|element| collapse_whitespace(element.text()))
            .filter(|title| !title.is_empty())
    })
}

/// Text of every `<p>` inside the first `<article>`, in document order
pub fn extract_article_paragraphs(document: &Html) -> Vec<String> {
    let Some(article) = document.select(&ARTICLE).next() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    article
        .select(&PARAGRAPH)
        .map(|element| collapse_whitespace(element.text()))
        .filter(|cleaned| !cleaned.is_empty() && seen.insert(cleaned.clone()))
        .collect()
}

/// Absolute, valid, de-duplicated link targets in document order
pub fn extract_links(document: &Html, page: &Url) -> Vec<Url> {
    let base = document_base(document, page);
    let mut seen = HashSet::new();
    let mut links: Vec<Url> = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(url) = element
            .value()
            .attr("href")
            .and_then(|href| link::resolve_href(&base, href))
        else {
            continue;
        };
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }
    links
}

/// The first `<base href>` resolved against the page, else the page itself
fn document_base(document: &Html, page: &Url) -> Url {
    document
        .select(&BASE)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page.join(href.trim()).ok())
        .filter(link::is_valid)
        .unwrap_or_else(|| page.clone())
}

fn collapse_whitespace<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
