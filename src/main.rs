//! CLI entry point for the transitfeeds client.
//!
//! Lists feeds from the getFeeds API, or decodes a saved response file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transitfeeds::{
    BasicClient, DEFAULT_ENDPOINT, FeedsRequest, Response, ResponseDecoder, UnknownFieldPolicy,
};

#[derive(Parser)]
#[command(name = "transitfeeds")]
#[command(about = "Query the TransitFeeds feed directory", long_about = None)]
struct Cli {
    /// Fail on fields the client does not know about
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one page of feeds (API key from TRANSITFEEDS_API_KEY)
    ListFeeds {
        /// API endpoint to call
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Location ID to filter by
        #[arg(short, long)]
        location: Option<String>,

        /// "0" to exclude sub-locations of --location
        #[arg(short, long)]
        descendants: Option<String>,

        /// Page number
        #[arg(short, long)]
        page: Option<i64>,

        /// Results per page
        #[arg(short = 'n', long)]
        limit: Option<i64>,

        /// Feed type: gtfs or gtfsrealtime
        #[arg(short = 't', long = "type")]
        feed_type: Option<String>,
    },
    /// Decode a saved getFeeds JSON response
    Decode {
        #[arg(value_name = "FILE")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transitfeeds.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transitfeeds.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let policy = if cli.strict {
        UnknownFieldPolicy::Strict
    } else {
        UnknownFieldPolicy::Tolerant
    };

    let response = match cli.command {
        Commands::ListFeeds {
            endpoint,
            location,
            descendants,
            page,
            limit,
            feed_type,
        } => {
            let api_key = std::env::var("TRANSITFEEDS_API_KEY")
                .context("TRANSITFEEDS_API_KEY must be set")?;

            let mut builder = FeedsRequest::builder(api_key)
                .api_endpoint(endpoint)
                .unknown_fields(policy);
            if let Some(location) = location {
                builder = builder.location(location);
            }
            if let Some(descendants) = descendants {
                builder = builder.descendants(descendants);
            }
            if let Some(page) = page {
                builder = builder.page(page);
            }
            if let Some(limit) = limit {
                builder = builder.limit(limit);
            }
            if let Some(feed_type) = feed_type {
                builder = builder.feed_type(feed_type);
            }

            builder.build()?.call(&BasicClient::new()).await?
        }
        Commands::Decode { path } => {
            let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {path}"))?;
            ResponseDecoder::new(policy).decode(&bytes)?
        }
    };

    report(&response);
    Ok(())
}

fn report(response: &Response) {
    if !response.is_ok() {
        warn!(
            status = response.status.as_deref().unwrap_or("<missing>"),
            message = response.error_description.as_deref().unwrap_or(""),
            input = response
                .results
                .as_ref()
                .and_then(|r| r.input.as_deref())
                .unwrap_or(""),
            "API returned an error status"
        );
        return;
    }

    let Some(results) = &response.results else {
        warn!("OK response without results");
        return;
    };

    for feed in results.feeds.iter().flatten() {
        let location = feed
            .location
            .as_ref()
            .and_then(|l| l.title_with_region.as_deref())
            .unwrap_or("");
        info!(
            feed_id = feed.id.as_deref().unwrap_or(""),
            feed_type = feed.feed_type.as_deref().unwrap_or(""),
            title = feed.title.as_deref().unwrap_or(""),
            location,
            download_url = feed.download_url().unwrap_or(""),
            latest = ?feed.latest.as_ref().and_then(|l| l.timestamp_utc()),
            "Feed"
        );
    }

    info!(
        total = results.total,
        page = results.page,
        num_pages = results.num_pages,
        last_page = results.is_last_page(),
        fetched_at = ?response.timestamp_utc(),
        "Feed list summary"
    );
}
