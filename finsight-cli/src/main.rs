//! finsight CLI - transaction analytics for a bank account
//!
//! Usage:
//!   finsight analyze --input statement.json       Text report
//!   finsight analyze --input export.csv --json    JSON result
//!   finsight goal --input statement.json --target 100000
//!   finsight fetch --output latest.json           Pull from the account backend
//!   finsight config init

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use finsight_analytics::{AggregationResult, Engine, GoalProjection};
use finsight_core::Transaction;
use finsight_ingest::{
    Normalizer, RawTransaction, parse_response_json, read_raw_csv, read_response_json,
};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod fetch;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "finsight",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINSIGHT_BUILD_SHA"), ")"),
    about = "Spending, savings and cash-flow analytics over bank transactions"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.finsight/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a saved transaction response or CSV export
    Analyze {
        #[arg(long)]
        input: PathBuf,

        /// Input format (default: from the file extension)
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Also project months to reach this savings target
        #[arg(long)]
        goal: Option<Decimal>,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Months needed to reach a savings target at the current net savings
    Goal {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        #[arg(long)]
        target: Decimal,
    },

    /// Fetch transactions from the account backend and analyze them
    Fetch {
        /// Save the raw response body here
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        goal: Option<Decimal>,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.finsight/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Analyze {
            input,
            format,
            goal,
            json,
        } => {
            let cfg = config::load_config(config_path)?;
            let records = load_records(&input, format)?;
            let txns = normalize_logged(&cfg, &records)?;
            let result = run_engine(&cfg, &txns, goal)?;
            print_result(&result, json)?;
        }

        Command::Goal {
            input,
            format,
            target,
        } => {
            let cfg = config::load_config(config_path)?;
            let records = load_records(&input, format)?;
            let txns = normalize_logged(&cfg, &records)?;
            let net = finsight_analytics::summarize_cash_flow(&txns).net_savings;
            let projection = GoalProjection::evaluate(target, net)
                .context("goal projection")?;
            println!("{}", report::render_goal(&projection));
        }

        Command::Fetch { output, goal, json } => {
            let cfg = config::load_config(config_path)?;
            let creds = fetch::Credentials::from_env(&cfg.api)?;
            let body = fetch::fetch_transactions(&cfg.api, &creds).await?;

            if let Some(path) = &output {
                std::fs::write(path, &body)
                    .with_context(|| format!("write {}", path.display()))?;
                info!("saved raw response to {}", path.display());
            }

            let resp = parse_response_json(&body).context("backend response")?;
            let txns = normalize_logged(&cfg, &resp.transactions)?;
            let result = run_engine(&cfg, &txns, goal)?;
            print_result(&result, json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(config_path)?,
            ConfigCommand::Show => {
                let cfg = config::load_config(config_path)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn load_records(path: &Path, format: Option<InputFormat>) -> Result<Vec<RawTransaction>> {
    if !path.exists() {
        bail!("input not found: {}", path.display());
    }

    let records = match format.unwrap_or_else(|| InputFormat::detect(path)) {
        InputFormat::Json => read_response_json(path)?.transactions,
        InputFormat::Csv => read_raw_csv(path)?,
    };
    info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Normalize and log every record that had to be dropped
fn normalize_logged(cfg: &Config, records: &[RawTransaction]) -> Result<Vec<Transaction>> {
    let normalizer = Normalizer::new(cfg.day_policy()?);
    let batch = normalizer.normalize(records);

    for rejected in &batch.rejected {
        warn!(index = rejected.index, "skipping record: {}", rejected.error);
    }
    if batch.transactions.is_empty() {
        warn!("no usable transactions; results will be empty");
    }

    Ok(batch.transactions)
}

fn run_engine(cfg: &Config, txns: &[Transaction], goal: Option<Decimal>) -> Result<AggregationResult> {
    let engine = Engine::new(cfg.engine_config()?);
    match goal {
        Some(target) => engine
            .analyze_with_goal(txns, target)
            .context("goal projection"),
        None => Ok(engine.analyze(txns)),
    }
}

fn print_result(result: &AggregationResult, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).context("serialize result")?
        );
    } else {
        print!("{}", report::render(result));
    }
    Ok(())
}
