//! Single-invocation planning lookup.
//!
//! Reads one `{"body": "<json>"}` event from stdin, runs the aggregator and
//! prints the `{statusCode, headers, body}` envelope to stdout.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use planproxy::arcgis::MapServiceClient;
use planproxy::config::Config;
use planproxy::planning::{handle_function, FunctionRequest, PlanningAggregator};

#[derive(Parser, Debug)]
#[command(name = "invoke")]
#[command(about = "Run one planning lookup from a function event on stdin")]
struct Args {
    /// Optional TOML file overriding upstream settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the response envelope
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the envelope
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read event from stdin")?;
    let request: FunctionRequest =
        serde_json::from_str(&input).context("Failed to parse function event")?;

    let aggregator = PlanningAggregator::new(MapServiceClient::from_config(&config.map_service)?);
    let response = handle_function(&aggregator, request).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
