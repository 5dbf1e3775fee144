use std::path::PathBuf;

use clap::Parser;

/// `langolier` - Nothing good ever came from a ten-year-old tweet.
#[derive(Parser, Debug)]
#[command(name = "langolier")]
#[command(version)]
#[command(about = "Delete old tweets, either by API iteration or archives", long_about = None)]
pub struct Cli {
    /// Read account configuration from FILE (default: ~/.langolier/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Process archive data DIR (the export's `data` directory) instead of the API
    #[arg(short, long, value_name = "DIR")]
    pub archive: Option<PathBuf>,

    /// Whale on the API to delete unusually persistent items
    #[arg(short, long)]
    pub force: bool,

    /// Skip processing up to ID (inclusive), counting down from the newest
    #[arg(short, long, value_name = "ID")]
    pub skip: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
