use std::path::PathBuf;

use clap::Parser;

use crate::{Commands, DisplayLocale};

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    name = "dday",
    version,
    about = "Track the days left until (and since) the dates that matter"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding the event data
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Language for dates and labels
    #[clap(long, value_enum)]
    pub locale: Option<DisplayLocale>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the dday application
    #[clap(subcommand)]
    pub command: Commands,
}
