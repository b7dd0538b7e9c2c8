//! Sitecheck CLI - Main Entry Point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sitecheck_cli::commands::{contact, generate, stub, users};
use sitecheck_cli::config::SuiteConfig;
use sitecheck_cli::output;

/// Acceptance suites for a `/users` REST service and a public contact form
#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./sitecheck.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print generated person records
    Generate(generate::GenerateArgs),

    /// Run the HTTP scenarios against the /users service
    Users(users::UsersArgs),

    /// Serve a local copy of the /users service
    Stub(stub::StubArgs),

    /// Run the browser scenarios for the contact form
    Contact(contact::ContactArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SuiteConfig::load(cli.config.as_deref())?;

    let success = match cli.command {
        Commands::Generate(args) => generate::execute(args, cli.format).map(|_| true)?,
        Commands::Users(args) => users::execute(args, &config, cli.format).await?,
        Commands::Stub(args) => stub::execute(args).await.map(|_| true)?,
        Commands::Contact(args) => contact::execute(args, &config, cli.format).await?,
        Commands::Version => {
            println!("sitecheck v{}", sitecheck_common::VERSION);
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
