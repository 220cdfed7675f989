use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use genesis_migrate::driver::{self, DEFAULT_CHAIN_ID, DEFAULT_START_TIME, MigrationArgs};
use std::{fs, path::PathBuf};
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Migrate genesis.json to add inflation", long_about = None)]
struct Args {
    /// Exported genesis file to migrate
    input: PathBuf,

    /// Write the migrated genesis here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chain id of the migrated chain
    #[arg(long, default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Genesis time of the migrated chain (RFC 3339)
    #[arg(long, default_value = DEFAULT_START_TIME, value_parser = MigrationArgs::parse_start_time)]
    start_time: DateTime<Utc>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (optional)
    #[arg(short, long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::INFO };

    // Keep the guard alive so buffered lines are flushed on exit
    let _guard = if let Some(log_file_path) = &args.log_file {
        if let Some(parent) = std::path::Path::new(log_file_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file_appender = tracing_appender::rolling::never("", log_file_path);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();

        info!("Logging to file: {}", log_file_path);
        Some(guard)
    } else {
        // stdout may carry the migrated genesis, so console logs go to stderr
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
        None
    };

    info!("Starting genesis migration");

    let migration = MigrationArgs::new(args.chain_id, args.start_time);
    driver::run(&args.input, args.output.as_deref(), &migration).await?;

    info!("Genesis migration completed successfully");
    Ok(())
}
