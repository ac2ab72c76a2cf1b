//! Browser form for summarizing a page.
//!
//! `GET /` renders the form, `POST /` runs the pipeline and renders the
//! results under it. The API key is never written back into the page.

use crate::pipeline::{self, SummaryRequest};
use crate::scraper::{ExtractMode, Fetcher};
use crate::summarizer::Summarizer;
use crate::summary::{Report, SummaryOutcome};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const PAGE_TITLE: &str = "Article summaries with Gemini";

/// Shared per-process clients; requests carry everything else
pub struct AppState {
    pub fetcher: Fetcher,
    pub summarizer: Summarizer,
    pub default_mode: ExtractMode,
}

#[derive(Debug, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub page_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub mode: Option<ExtractMode>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(bind: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page("", state.default_mode, ""))
}

async fn submit(State(state): State<Arc<AppState>>, Form(input): Form<FormInput>) -> Html<String> {
    let mode = input.mode.unwrap_or(state.default_mode);
    let request = SummaryRequest::new(input.page_url.clone(), input.api_key, mode);

    let results = match pipeline::run(&state.fetcher, &state.summarizer, &request).await {
        Ok(report) => render_report(&report),
        Err(e) => format!(r#"<p class="error">{}</p>"#, encode_text(&e.to_string())),
    };
    Html(render_page(&input.page_url, mode, &results))
}

fn render_page(page_url: &str, mode: ExtractMode, results: &str) -> String {
    let selected = |m: ExtractMode| if m == mode { " selected" } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
        label {{ display: block; margin-top: 1rem; }}
        input, select {{ width: 100%; padding: 0.4rem; }}
        .error {{ color: #b00020; }}
        .summary {{ white-space: pre-wrap; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <form method="post" action="/">
        <label>Enter the webpage URL:
            <input type="text" name="page_url" value="{page_url}">
        </label>
        <label>Enter your Gemini API key:
            <input type="password" name="api_key" autocomplete="off">
        </label>
        <label>Summarise:
            <select name="mode">
                <option value="article"{article}>article paragraphs</option>
                <option value="links"{links}>linked pages</option>
            </select>
        </label>
        <p><button type="submit">Show summaries</button></p>
    </form>
    {results}
</body>
</html>
"#,
        title = PAGE_TITLE,
        page_url = encode_double_quoted_attribute(page_url),
        article = selected(ExtractMode::Article),
        links = selected(ExtractMode::Links),
        results = results,
    )
}

fn render_report(report: &Report) -> String {
    let mut out = String::from("<section>");
    if let Some(title) = &report.title {
        let _ = write!(out, "<h2>{}</h2>", encode_text(title));
    }
    for item in &report.items {
        match &item.outcome {
            SummaryOutcome::Summary(text) => {
                let _ = write!(
                    out,
                    r#"<h3>Summary of {}:</h3><div class="summary">{}</div>"#,
                    encode_text(&item.label),
                    encode_text(text)
                );
            }
            SummaryOutcome::Failed(reason) => {
                let _ = write!(
                    out,
                    r#"<p class="error">Failed to summarize {}: {}</p>"#,
                    encode_text(&item.label),
                    encode_text(reason)
                );
            }
        }
    }
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::ExtractedItem;
    use crate::summary::ItemReport;

    #[test]
    fn report_text_is_escaped() {
        let report = Report {
            page: url::Url::parse("https://example.com/").unwrap(),
            title: Some("Tom & <Jerry>".into()),
            mode: ExtractMode::Article,
            items: vec![ItemReport {
                label: "paragraph 1".into(),
                item: ExtractedItem::Paragraph("x".into()),
                outcome: SummaryOutcome::Summary("<script>alert(1)</script>".into()),
            }],
            finished_at: chrono::Utc::now(),
        };
        let html = render_report(&report);
        assert!(html.contains("<h2>Tom &amp; &lt;Jerry&gt;</h2>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn page_keeps_url_and_mode() {
        let page = render_page("example.com/?q=\"x\"", ExtractMode::Links, "");
        assert!(page.contains(r#"value="example.com/?q=&quot;x&quot;""#));
        assert!(page.contains(r#"<option value="links" selected>"#));
        assert!(page.contains(r#"<option value="article">"#));
    }
}
