mod args;
mod op;
mod ops;
mod render;
mod state;

use std::str::FromStr;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{CopyCid, Init, Ls, SignIn, SignOut, Upload, Version};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Init, Init),
    (SignIn, SignIn),
    (SignOut, SignOut),
    (Upload, Upload),
    (Ls, Ls),
    (Copy, CopyCid),
    (Version, Version),
}

/// Log to stderr so command output on stdout stays clean.
/// The returned guard must be kept alive until exit.
fn init_logging(log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let level = LevelFilter::from_str(log_level).unwrap_or_else(|_| {
        eprintln!("Warning: unknown log level {:?}, using warn", log_level);
        LevelFilter::WARN
    });

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(layer).init();
    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let guard = init_logging(&args.log_level);

    let ctx = op::OpContext::new(args.config_path);
    tracing::debug!(build = %common::build_info!(), "starting");

    let result = args.command.execute(&ctx).await;
    // flush buffered log lines before exiting
    drop(guard);

    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
