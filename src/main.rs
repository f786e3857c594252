//! revlookup CLI
//!
//! Reverse phone number lookup against the WhitePages directory.
//! Results go to stdout as JSON or YAML; progress and logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use revlookup::lookup::{run_lookup, LookupArgs};
use revlookup::parse::{run_parse, ParseArgs};
use revlookup::rules::{run_rules, RulesArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "revlookup")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Reverse phone number lookup")]
#[command(long_about = "Resolves phone numbers to name and address by scraping the WhitePages reverse lookup page.\n\nCommands:\n  lookup    Look up one or more phone numbers\n  parse     Run the extraction rules over a saved page\n  rules     Print the effective extraction rules")]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more phone numbers
    Lookup(LookupArgs),
    /// Run the extraction rules over a saved HTML page
    Parse(ParseArgs),
    /// Print the effective extraction rules as YAML
    Rules(RulesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lookup(args) => run_lookup(args).await,
        Commands::Parse(args) => run_parse(args).await,
        Commands::Rules(args) => run_rules(args).await,
    }
}
