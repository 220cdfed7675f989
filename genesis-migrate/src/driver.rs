use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::{error::MigrationError, migrate::process_genesis};

pub const DEFAULT_CHAIN_ID: &str = "betanet-1";
pub const DEFAULT_START_TIME: &str = "2019-02-11T12:00:00Z";

/// Parameters taken from the command line for one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationArgs {
    pub chain_id: String,
    pub genesis_time: DateTime<Utc>,
}

impl MigrationArgs {
    pub fn new(chain_id: impl Into<String>, genesis_time: DateTime<Utc>) -> Self {
        Self { chain_id: chain_id.into(), genesis_time }
    }

    /// Parses an RFC 3339 timestamp into UTC. Used as a clap value parser.
    pub fn parse_start_time(value: &str) -> std::result::Result<DateTime<Utc>, MigrationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|time| time.with_timezone(&Utc))
            .map_err(|e| MigrationError::InvalidArgument(format!("start time {value:?}: {e}")))
    }

    pub fn genesis_time_string(&self) -> String {
        self.genesis_time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

pub async fn load_genesis(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read genesis from {}", path.display()))?;
    let genesis = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse genesis at {}", path.display()))?;
    Ok(genesis)
}

/// Stamps the chain id and genesis time onto a migrated document.
pub fn finalize(genesis: &mut Value, args: &MigrationArgs) -> std::result::Result<(), MigrationError> {
    if args.chain_id.trim().is_empty() {
        return Err(MigrationError::InvalidArgument("chain id must not be empty".to_string()));
    }
    let root = genesis
        .as_object_mut()
        .ok_or_else(|| MigrationError::unexpected(&[], "object"))?;
    root.insert("chain_id".to_string(), Value::from(args.chain_id.as_str()));
    root.insert("genesis_time".to_string(), Value::from(args.genesis_time_string()));
    Ok(())
}

/// Pretty JSON with sorted keys and a trailing newline.
pub fn render(genesis: &Value) -> std::result::Result<String, MigrationError> {
    let mut out = serde_json::to_string_pretty(genesis)?;
    out.push('\n');
    Ok(out)
}

pub async fn save_genesis(path: &Path, genesis: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    tokio::fs::write(path, render(genesis)?)
        .await
        .with_context(|| format!("failed to write genesis to {}", path.display()))?;
    Ok(())
}

/// Loads `input`, migrates it, stamps it and writes it to `output` (or stdout).
pub async fn run(input: &Path, output: Option<&Path>, args: &MigrationArgs) -> Result<Value> {
    info!("Reading genesis from: {}", input.display());
    let genesis = load_genesis(input).await?;

    let mut genesis = process_genesis(genesis, args).context("genesis migration failed")?;
    finalize(&mut genesis, args)?;
    info!("Chain id {}, genesis time {}", args.chain_id, args.genesis_time_string());

    match output {
        Some(path) => {
            save_genesis(path, &genesis).await?;
            info!("Migrated genesis written to: {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(render(&genesis)?.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(genesis)
}
