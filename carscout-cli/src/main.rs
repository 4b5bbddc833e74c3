//! Carscout CLI - vehicle research from the terminal
//!
//! Runs the same tools an agent would call and prints exactly what the
//! agent would receive, citation footer included.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::process::ExitCode;
use std::sync::Arc;

use carscout::carapi::{API_SECRET_ENV, API_TOKEN_ENV};
use carscout::prelude::*;
use carscout::tools::{
    SearchCarEnginesArgs, SearchCarMakesArgs, SearchCarModelsArgs, SearchCarTrimsArgs,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Carscout - CarAPI vehicle data with source citations
#[derive(Parser)]
#[command(name = "carscout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// CarAPI base URL
    #[arg(long, env = "CAR_API_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List car makes
    Makes(PagingArgs),

    /// List car models
    Models(ModelsArgs),

    /// List trims with engine basics
    Trims(TrimsArgs),

    /// List engine specifications
    Engines(EnginesArgs),

    /// Print tool definitions as JSON
    Tools,

    /// Show base URL and credential status
    Status,
}

/// Page selection
#[derive(Args)]
struct PagingArgs {
    /// Page size
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    /// Page number
    #[arg(short, long)]
    page: Option<u32>,
}

/// Arguments for the models command
#[derive(Args)]
struct ModelsArgs {
    /// Make filter, e.g. Ford
    #[arg(long)]
    make: Option<String>,

    /// Model year filter
    #[arg(short, long)]
    year: Option<u32>,

    #[command(flatten)]
    paging: PagingArgs,
}

/// Arguments for the trims command
#[derive(Args)]
struct TrimsArgs {
    /// Make filter
    #[arg(long)]
    make: Option<String>,

    /// Model filter
    #[arg(long)]
    model: Option<String>,

    /// Model year filter
    #[arg(short, long)]
    year: Option<u32>,

    #[command(flatten)]
    paging: PagingArgs,
}

/// Arguments for the engines command
#[derive(Args)]
struct EnginesArgs {
    /// Make filter
    #[arg(long)]
    make: Option<String>,

    /// Model filter
    #[arg(long)]
    model: Option<String>,

    /// Page size (CarAPI default when omitted)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Page number
    #[arg(short, long)]
    page: Option<u32>,
}

impl From<PagingArgs> for SearchCarMakesArgs {
    fn from(paging: PagingArgs) -> Self {
        Self {
            limit: paging.limit,
            page: paging.page,
        }
    }
}

impl From<ModelsArgs> for SearchCarModelsArgs {
    fn from(args: ModelsArgs) -> Self {
        Self {
            make: args.make,
            year: args.year,
            limit: args.paging.limit,
            page: args.paging.page,
        }
    }
}

impl From<TrimsArgs> for SearchCarTrimsArgs {
    fn from(args: TrimsArgs) -> Self {
        Self {
            make: args.make,
            model: args.model,
            year: args.year,
            limit: args.paging.limit,
            page: args.paging.page,
        }
    }
}

impl From<EnginesArgs> for SearchCarEnginesArgs {
    fn from(args: EnginesArgs) -> Self {
        Self {
            make: args.make,
            model: args.model,
            limit: args.limit,
            page: args.page,
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
///
/// Logs go to stderr so stdout carries only tool output.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "carscout={level},carscout_cli={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = CarApiConfig::from_env();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }

    let (name, args) = match cli.command {
        Commands::Status => {
            status(&config);
            return Ok(());
        }
        Commands::Tools => {
            let toolbox = vehicle_toolbox(&Arc::new(CarApiClient::new(config)?));
            println!("{}", serde_json::to_string_pretty(&toolbox.definitions())?);
            return Ok(());
        }
        Commands::Makes(paging) => (
            SearchCarMakes::NAME,
            serde_json::to_value(SearchCarMakesArgs::from(paging))?,
        ),
        Commands::Models(args) => (
            SearchCarModels::NAME,
            serde_json::to_value(SearchCarModelsArgs::from(args))?,
        ),
        Commands::Trims(args) => (
            SearchCarTrims::NAME,
            serde_json::to_value(SearchCarTrimsArgs::from(args))?,
        ),
        Commands::Engines(args) => (
            SearchCarEngines::NAME,
            serde_json::to_value(SearchCarEnginesArgs::from(args))?,
        ),
    };

    let toolbox = vehicle_toolbox(&Arc::new(CarApiClient::new(config)?));
    tracing::debug!(tool = name, %args, "invoking tool");

    match toolbox.call(name, args).await? {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}

/// Print the effective configuration without revealing secrets.
fn status(config: &CarApiConfig) {
    let set = |var: &str| {
        if std::env::var(var).is_ok_and(|v| !v.trim().is_empty()) {
            "set"
        } else {
            "not set"
        }
    };

    println!("Carscout Status");
    println!("===============");
    println!();
    println!("Base URL: {}", config.base_url);
    println!("Auth timeout: {}s", config.auth_timeout.as_secs());
    println!("Request timeout: {}s", config.request_timeout.as_secs());
    println!();
    println!("Credentials:");
    println!("  {API_TOKEN_ENV}: {}", set(API_TOKEN_ENV));
    println!("  {API_SECRET_ENV}: {}", set(API_SECRET_ENV));
}
