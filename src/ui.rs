//! Terminal presentation: interactive prompts and report rendering.

use crate::pipeline::{PipelineError, SummaryRequest};
use crate::scraper::ExtractMode;
use crate::summary::{Report, SummaryOutcome};
use colored::Colorize;
use dialoguer::{Input, Password, Select};

/// Ask for the page URL, the API key (masked) and the extraction mode.
///
/// `default_key` pre-fills the key from config; an empty answer keeps it.
pub fn prompt_request(
    default_key: Option<&str>,
    default_mode: ExtractMode,
) -> dialoguer::Result<SummaryRequest> {
    let page_url = Input::<String>::new()
        .with_prompt("Enter the webpage URL")
        .allow_empty(true)
        .interact_text()?;

    let key_prompt = if default_key.is_some() {
        "Enter your Gemini API key (leave empty to use the configured one)"
    } else {
        "Enter your Gemini API key"
    };
    let entered = Password::new()
        .with_prompt(key_prompt)
        .allow_empty_password(true)
        .interact()?;
    let api_key = match (entered.trim().is_empty(), default_key) {
        (true, Some(key)) => key.to_string(),
        _ => entered,
    };

    let modes = [ExtractMode::Article, ExtractMode::Links];
    let default_index = modes.iter().position(|m| *m == default_mode).unwrap_or(0);
    let selected = Select::new()
        .with_prompt("Summarise")
        .items(&["article paragraphs", "linked pages"])
        .default(default_index)
        .interact()?;

    Ok(SummaryRequest::new(page_url, api_key, modes[selected]))
}

/// Render a report for the terminal
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let title = report.title.as_deref().unwrap_or("No title");
    out.push_str(&format!("=== {} ===\n", title.bold()));
    out.push_str(&format!("{}\n\n", report.page.as_str().dimmed()));

    for item in &report.items {
        match &item.outcome {
            SummaryOutcome::Summary(text) => {
                out.push_str(&format!("{}\n", format!("Summary of {}:", item.label).green().bold()));
                out.push_str(text.trim_end());
                out.push_str("\n\n");
            }
            SummaryOutcome::Failed(reason) => {
                let line = format!("Failed to summarize {}: {}", item.label, reason);
                out.push_str(&format!("{}\n\n", line.red()));
            }
        }
    }

    out.push_str(&format!(
        "--- {} summarised, {} failed ({}) ---\n",
        report.summarized(),
        report.failed(),
        report.finished_at.format("%Y-%m-%d %H:%M")
    ));
    out
}

/// Render a pipeline failure as a single message
pub fn render_error(error: &PipelineError) -> String {
    error.to_string().red().to_string()
}
