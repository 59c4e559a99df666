use clap::Parser;
use quotefeed::cli::commands::{Cli, Commands};
use quotefeed::cli::report::FeedReport;
use quotefeed::domain::entities::security::Security;
use quotefeed::JsonQuoteFeed;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let feed = match JsonQuoteFeed::new() {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error initializing quote feed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(feed, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(feed: JsonQuoteFeed, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Fetch {
            security,
            preview,
            raw,
        } => {
            let security = load_security(&security)?;
            let data = if preview {
                feed.preview_historical_quotes(&security).await?
            } else {
                feed.historical_quotes(&security, raw).await?
            };
            println!("{}", serde_json::to_string_pretty(&FeedReport::from(&data))?);
        }
        Commands::Latest { security } => {
            let security = load_security(&security)?;
            let latest = feed.latest_quote(&security).await?;
            println!("{}", serde_json::to_string_pretty(&latest)?);
        }
        Commands::Parse { security, document } => {
            let security = load_security(&security)?;
            let text = std::fs::read_to_string(&document)
                .map_err(|e| format!("Cannot read {}: {e}", document.display()))?;
            let data = feed.parse_document(&security, &text)?;
            println!("{}", serde_json::to_string_pretty(&FeedReport::from(&data))?);
        }
    }
    Ok(())
}

fn load_security(path: &Path) -> Result<Security, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid security file {}: {e}", path.display()))
}
