use std::io::Read;
use std::time::Duration;

use clap::{ArgGroup, Parser, ValueEnum};
use eyre::WrapErr;
use serde_json::{json, Value};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tx_insight::registry::DEFAULT_REGISTRY_URL;
use tx_insight::transaction_data::get_transaction_request;
use tx_insight::{EarliestCreated, FourByteDirectory, InsightPipeline, LowestId, RegistryConfig};

/// Show which function a transaction calls and with which arguments
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["data", "tx", "tx_hash"])))]
struct Args {
    /// Raw call data (hex, optionally 0x prefixed)
    #[arg(long)]
    data: Option<String>,

    /// Transaction object as JSON, `@path` to read it from a file or `-` for stdin
    #[arg(long)]
    tx: Option<String>,

    /// Hash of a mined transaction to fetch over JSON-RPC
    #[arg(long)]
    tx_hash: Option<String>,

    /// JSON-RPC endpoint used with --tx-hash (defaults to $RPC_URL)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Signature registry endpoint
    #[arg(long, default_value = DEFAULT_REGISTRY_URL)]
    registry_url: String,

    /// Timeout for the registry request in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// How to pick between signatures sharing a selector
    #[arg(long, value_enum, default_value_t = Strategy::Earliest)]
    strategy: Strategy,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Earliest registered signature
    Earliest,
    /// Lowest registry id
    LowestId,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Tree,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("Invalid log level '{}': {}. Falling back to 'warn'", level, e);
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // stdout carries the insight, logs go to stderr
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

async fn read_transaction(args: &Args) -> eyre::Result<Value> {
    if let Some(data) = &args.data {
        return Ok(json!({ "data": data }));
    }
    if let Some(tx_hash) = &args.tx_hash {
        return get_transaction_request(tx_hash, args.rpc_url.as_deref()).await;
    }
    let raw = match args.tx.as_deref() {
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("could not read transaction from stdin")?;
            buffer
        }
        Some(path) if path.starts_with('@') => std::fs::read_to_string(&path[1..])
            .wrap_err_with(|| format!("could not read transaction file {}", &path[1..]))?,
        Some(inline) => inline.to_string(),
        None => eyre::bail!("one of --data, --tx or --tx-hash is required"),
    };
    serde_json::from_str(&raw).wrap_err("transaction is not valid JSON")
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let transaction = read_transaction(&args).await?;
    let registry = FourByteDirectory::new(RegistryConfig {
        base_url: args.registry_url.clone(),
        timeout: args.timeout_secs.map(Duration::from_secs),
    })?;
    let pipeline = match args.strategy {
        Strategy::Earliest => InsightPipeline::new(registry).with_strategy(EarliestCreated),
        Strategy::LowestId => InsightPipeline::new(registry).with_strategy(LowestId),
    };

    let insight = pipeline.on_transaction(&transaction).await?;
    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&insight)?),
        Format::Tree => tx_insight::print_insight(&insight),
    }
    Ok(())
}
