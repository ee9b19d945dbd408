//! doppelcheck: verify a claim against sources and audit stored evidence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use doppelcheck_evidence::EvidenceVault;
use doppelcheck_types::{Fingerprint, RawSource, SystemClock};
use doppelcheck_utils::{init_logging, LogFormat};
use doppelcheck_verifier::{open_backend, Verifier, VerifierConfig};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "doppelcheck", about = "Claim verification with a tamper-evident audit trail")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "DOPPELCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Model identifier: "local:<name>" or "cloud:<name>".
    #[arg(long, global = true, env = "DOPPELCHECK_MODEL")]
    model: Option<String>,

    /// Evidence storage: "memory://<name>" or "lmdb://<path>".
    #[arg(long, global = true, env = "DOPPELCHECK_EVIDENCE_URL")]
    evidence_url: Option<String>,

    /// Model deadline in milliseconds.
    #[arg(long, global = true, env = "DOPPELCHECK_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "DOPPELCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "DOPPELCHECK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Verify one claim and print the report as JSON.
    Verify {
        /// The claim text.
        #[arg(long)]
        claim: String,

        /// JSON file holding an array of source objects.
        #[arg(long)]
        sources: PathBuf,

        /// JSON file holding a context object passed to the model.
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Inspect stored evidence records.
    Evidence {
        #[command(subcommand)]
        action: EvidenceAction,
    },
}

#[derive(clap::Subcommand)]
enum EvidenceAction {
    /// Print a stored record as JSON.
    Show { id: Fingerprint },
    /// Recompute a record's fingerprint and audit its trust chain.
    Check { id: Fingerprint },
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<VerifierConfig> {
        let mut config = match &self.config {
            Some(path) => VerifierConfig::from_toml_file(path)?,
            None => VerifierConfig::default(),
        };
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(url) = &self.evidence_url {
            config.evidence_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.provider_timeout_ms = ms;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

async fn run_evidence(vault: &EvidenceVault, action: EvidenceAction) -> anyhow::Result<()> {
    match action {
        EvidenceAction::Show { id } => {
            let record = vault.retrieve(&id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        EvidenceAction::Check { id } => {
            if !vault.check_integrity(&id).await? {
                bail!("{id}: integrity violation");
            }
            println!("{id}: intact");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(config.log_format, &config.log_level)?;
    tracing::debug!(model = %config.model, evidence_url = %config.evidence_url, "configuration loaded");

    match cli.command {
        Command::Verify {
            claim,
            sources,
            context,
        } => {
            let sources: Vec<RawSource> = read_json(&sources)?;
            let context: Option<Map<String, Value>> = match context {
                Some(path) => Some(read_json(&path)?),
                None => None,
            };

            let verifier = Verifier::from_config(&config)?;
            let result = verifier.verify(&claim, &sources, context.as_ref()).await;
            verifier.close().await?;
            let report = result?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Evidence { action } => {
            if config.evidence_url.starts_with("memory://") {
                tracing::warn!("memory evidence storage is empty in a fresh process; use lmdb://");
            }
            let vault =
                EvidenceVault::new(open_backend(&config.evidence_url)?, Arc::new(SystemClock));
            let result = run_evidence(&vault, action).await;
            vault.close().await?;
            result?;
        }
    }
    Ok(())
}
