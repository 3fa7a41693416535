use anyhow::{Context, Result};
use clap::Parser;

use baidu_search::observability::{init_logging, LogFormat};
use baidu_search::prelude::*;

#[derive(Parser)]
#[command(
    name = "baidu-search",
    about = "Search Baidu and print the results as JSON",
    version
)]
struct Cli {
    /// Search query
    query: String,

    /// Kind of search: web, news, video, or image
    #[arg(long, short, default_value = "web")]
    kind: SearchType,

    /// Number of results to return
    #[arg(long, short, default_value_t = 10)]
    num: usize,

    /// Page number, starting at 1
    #[arg(long, short, default_value_t = 1)]
    page: usize,

    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = 10.0)]
    timeout: f64,

    /// Retries after the first failed attempt
    #[arg(long, default_value_t = 3)]
    retries: usize,

    /// Pause after the request, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(format, "info");

    if !cli.kind.is_fully_supported() {
        tracing::warn!(kind = %cli.kind, "This search type returns no records");
    }

    let config = SearchConfig::new()
        .with_timeout(cli.timeout)
        .with_retries(cli.retries)
        .with_delay(cli.delay);
    let client = BaiduSearch::new(config).context("failed to build search client")?;

    let request = SearchRequest::new(cli.kind, cli.query)
        .with_count(cli.num)
        .with_page(cli.page);
    let results = client.search(&request);

    println!(
        "{}",
        serde_json::to_string_pretty(&results).context("failed to serialize results")?
    );
    Ok(())
}
