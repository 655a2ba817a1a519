pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "decloud")]
#[command(version, about = "Upload files to IPFS and keep track of what you stored")]
pub struct Args {
    /// Path to the decloud config directory (defaults to ~/.decloud)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
