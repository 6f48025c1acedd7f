use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use progression::{
    config::Config,
    export::{chart_series, records_to_csv},
    extractor::Record,
    fetcher::PageFetcher,
    telemetry,
};

/// Extract record progressions from HTML tables.
#[derive(Debug, Parser)]
#[command(name = "progression", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a page and extract its records.
    Scrape(ScrapeArgs),

    /// Extract records from a local HTML file.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ScrapeArgs {
    /// Page URL.
    url: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// HTML file path.
    file: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// CSS class of candidate tables (overrides TABLE_MARKER).
    #[arg(short, long)]
    marker: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Chart,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    // stderr keeps stdout machine-readable
    telemetry::init(
        config.log_format(),
        telemetry::verbosity_filter(cli.verbose),
        std::io::stderr,
    );

    let (html, output) = match cli.command {
        Commands::Scrape(args) => {
            let fetcher = PageFetcher::new(&config.fetch_settings())?;
            let page = fetcher
                .fetch(&args.url)
                .await
                .with_context(|| format!("failed to fetch {}", args.url))?;
            (page.body_utf8, args.output)
        }
        Commands::Parse(args) => {
            let html = std::fs::read_to_string(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            (html, args.output)
        }
    };

    if let Some(marker) = output.marker {
        config = config.with_table_marker(marker);
    }
    let records = config.table_extractor()?.extract(&html);
    tracing::info!(records = records.len(), "extraction finished");

    print!("{}", render(&records, output.format)?);
    Ok(())
}

fn render(records: &[Record], format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(&serde_json::json!({ "data": records }))? + "\n",
        Format::Csv => records_to_csv(records)?,
        Format::Chart => serde_json::to_string_pretty(&chart_series(records))? + "\n",
    })
}
