//! Ringkas CLI - webpage summarisation with Gemini
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ringkas::web::{self, AppState};
use ringkas::{logging, pipeline, ui, Config, ExtractMode, Fetcher, Summarizer, SummaryRequest};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ringkas")]
#[command(author, version, about = "Summarise webpage articles with Gemini", long_about = None)]
struct Cli {
    /// Config file to use instead of ringkas.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL of the page; `https://` is assumed when no scheme is given
        url: String,
        /// Gemini API key (defaults to GEMINI_API_KEY or the config file)
        #[arg(long)]
        api_key: Option<String>,
        /// What to extract from the page
        #[arg(long, value_enum)]
        mode: Option<ExtractMode>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the summary form over HTTP
    Serve {
        /// Address to listen on (defaults to the config file)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?
            .with_api_key_override(std::env::var("GEMINI_API_KEY").ok()),
        None => Config::load()?,
    };

    let fetcher = Fetcher::new(&config.http)?;
    let summarizer = Summarizer::new(fetcher.client().clone(), &config.gemini);

    match cli.command {
        Some(Commands::Summarise {
            url,
            api_key,
            mode,
            json,
        }) => {
            let api_key = api_key
                .or_else(|| config.gemini.api_key.clone())
                .unwrap_or_default();
            let request = SummaryRequest::new(url, api_key, mode.unwrap_or(config.extract.mode));
            summarise(&fetcher, &summarizer, &request, json).await?;
        }
        Some(Commands::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = Arc::new(AppState {
                fetcher,
                summarizer,
                default_mode: config.extract.mode,
            });
            web::serve(&bind, state).await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ringkas", &mut std::io::stdout());
        }
        None => {
            if !atty::is(atty::Stream::Stdin) {
                Cli::command().print_help()?;
                return Ok(());
            }
            let request = ui::prompt_request(config.gemini.api_key.as_deref(), config.extract.mode)?;
            summarise(&fetcher, &summarizer, &request, false).await?;
        }
    }

    Ok(())
}

async fn summarise(
    fetcher: &Fetcher,
    summarizer: &Summarizer,
    request: &SummaryRequest,
    json: bool,
) -> anyhow::Result<()> {
    let report = pipeline::run(fetcher, summarizer, request)
        .await
        .map_err(|e| anyhow::anyhow!(ui::render_error(&e)))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", ui::render_report(&report));
    }
    Ok(())
}
