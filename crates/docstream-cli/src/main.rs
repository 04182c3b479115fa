//! docstream CLI - dump a MongoDB collection as JSON lines
//!
//! Usage:
//!   docstream -u <user> -p <pass> -h <host[:port]> -d <db> -c <collection>
//!   docstream ... -q "coffee shop"        Full-text search (needs a text index)
//!   docstream ... --log-level debug       Verbose diagnostics on stderr
//!
//! Every matching document is printed to stdout as one JSON object per line,
//! without its `_id`. Diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use std::process::ExitCode;
use tracing::{debug, error};

use docstream_mongodb::{execute, ConnectConfig, DocstreamError, RunnerConfig, StreamSummary};

#[derive(Parser, Debug)]
#[command(name = "docstream")]
#[command(about = "Stream MongoDB documents to stdout as JSON lines", long_about = None)]
#[command(version)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Username
    #[arg(short = 'u', value_name = "USERNAME")]
    username: Option<String>,

    /// Password
    #[arg(short = 'p', value_name = "PASSWORD")]
    password: Option<String>,

    /// Host, optionally with port
    #[arg(short = 'h', value_name = "HOST")]
    host: Option<String>,

    /// Database name
    #[arg(short = 'd', value_name = "DATABASE")]
    database: Option<String>,

    /// Collection name
    #[arg(short = 'c', value_name = "COLLECTION")]
    collection: Option<String>,

    /// Optional full-text query
    #[arg(short = 'q', value_name = "QUERY")]
    query: Option<String>,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Arguments after the first non-flag are ignored, flags included
    #[arg(hide = true, trailing_var_arg = true)]
    ignored: Vec<String>,
}

impl Cli {
    /// Invocation parameters; absent flags become empty strings
    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            host: self.host.clone().unwrap_or_default(),
            database: self.database.clone().unwrap_or_default(),
            collection: self.collection.clone().unwrap_or_default(),
            query: self.query.clone().filter(|q| !q.is_empty()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if !cli.ignored.is_empty() {
        debug!(args = ?cli.ignored, "Ignoring trailing arguments");
    }

    match run(&cli.runner_config()) {
        Ok(summary) => {
            debug!(documents = summary.documents, "Done");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

/// Print the failure and pick the exit status. Configuration errors get
/// usage text instead of a log line.
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<DocstreamError>() {
        Some(e) if e.is_configuration() => {
            eprintln!("{}", e);
            eprintln!("{}", Cli::command().render_help());
            ExitCode::from(e.exit_code())
        }
        Some(e) => {
            error!("{:#}", err);
            ExitCode::from(e.exit_code())
        }
        None => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Validate, connect, query and stream to stdout
fn run(config: &RunnerConfig) -> Result<StreamSummary> {
    let rt = tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = rt.block_on(execute(config, ConnectConfig::default(), &mut out))?;
    Ok(summary)
}

/// Initialize logging on stderr; stdout carries only documents
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok(); // Ignore error if already initialized
}
