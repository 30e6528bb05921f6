use crate::cli::{Args, Command};
use anyhow::{anyhow, Context};
use clap::Parser;
use lblod_mcp::framing::{read_message, write_message};
use lblod_mcp::{
    DecisionUrisParams, McpServer, MunicipalCouncilUriParams, MunicipalityUriParams,
    ServerConfig, ToolSet,
};
use lblod_resolver::DecisionResolver;
use lblod_sparql_client::{ClientConfig, HttpQueryExecutor, QueryExecutor};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log)?;

    let mut config = ClientConfig::new(args.endpoint);
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let executor = HttpQueryExecutor::new(config).context("Failed to build the HTTP client")?;
    let tools = ToolSet::new(DecisionResolver::new(executor));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&runtime, &McpServer::new(ServerConfig::default(), tools)),
        Command::Municipality { name } => print_json(
            &runtime.block_on(tools.municipality_uri(MunicipalityUriParams { name })),
        ),
        Command::Council { municipality_uri } => print_json(&runtime.block_on(
            tools.municipal_council_uri(MunicipalCouncilUriParams { municipality_uri }),
        )),
        Command::Decisions {
            name,
            number,
            order,
        } => {
            let uris = runtime.block_on(tools.decision_uris(DecisionUrisParams {
                name,
                number,
                order: order.to_string(),
            }))?;
            print_json(&uris)
        }
    }
}

/// Logs go to stderr: stdout carries the protocol.
fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter '{default_filter}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

/// Answers MCP messages from stdin until it is closed.
fn serve<E: QueryExecutor>(runtime: &Runtime, server: &McpServer<E>) -> anyhow::Result<()> {
    info!(name = %server.config().name, "Serving MCP over stdio");
    let mut reader = io::stdin().lock();
    let mut writer = io::stdout().lock();
    loop {
        let (message, format) = match read_message(&mut reader) {
            Ok(Some(message)) => message,
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "Skipping unreadable message");
                continue;
            }
            Err(e) => return Err(e).context("Failed to read from stdin"),
        };
        if let Some(response) = runtime.block_on(server.handle(&message)) {
            write_message(&mut writer, &response, format).context("Failed to write to stdout")?;
        }
    }
    info!("Input closed, shutting down");
    Ok(())
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
