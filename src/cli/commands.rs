use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quotefeed", about = "Price history from generic JSON quote feeds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the historical quotes of a security
    Fetch {
        /// Security description (JSON with name, feed_url, properties, ...)
        security: PathBuf,
        /// Stop after the first 100 quotes and include raw responses
        #[arg(long)]
        preview: bool,
        /// Include the raw page responses in the output
        #[arg(long)]
        raw: bool,
    },
    /// Fetch the most recent quote of a security
    Latest {
        /// Security description (JSON)
        security: PathBuf,
    },
    /// Parse a locally saved feed document with a security's configuration
    Parse {
        /// Security description (JSON)
        security: PathBuf,
        /// JSON (or JSONP) document
        document: PathBuf,
    },
}
