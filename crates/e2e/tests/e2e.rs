//! Browser scenario harness entry point
//!
//! Runs the YAML specs and the generated contact form scenario.
//! Run with: cargo test --package sitecheck-e2e --test e2e -- --specs crates/e2e/specs

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use sitecheck_e2e::runner::RunnerConfig;
use sitecheck_e2e::{Browser, ContactForm, E2eError, E2eResult, PlaywrightConfig, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "sitecheck-e2e")]
#[command(about = "Browser scenarios for sitecheck")]
struct Args {
    /// Path to test specs directory
    #[arg(short, long, default_value = "specs")]
    specs: PathBuf,

    /// Run only tests matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific test by name
    #[arg(short, long)]
    name: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Directory whose node_modules provides playwright
    #[arg(long, default_value = ".")]
    node_dir: PathBuf,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,

    /// Accepted for compatibility with the cargo test runner
    #[arg(long, hide = true)]
    nocapture: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(E2eError::PlaywrightNotFound) => {
            warn!("skipping browser scenarios: {}", E2eError::PlaywrightNotFound);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let browser: Browser = args.browser.parse()?;

    let config = RunnerConfig {
        playwright: PlaywrightConfig {
            browser,
            headless: !args.headed,
            working_dir: args.node_dir,
            screenshot_dir: args.output.join("screenshots"),
            ..Default::default()
        },
        specs_dir: args.specs,
        output_dir: args.output,
    };
    let runner = TestRunner::with_config(config);

    let contact = ContactForm::prometheus_group()
        .validation_spec(&[("First Name", "First"), ("Last Name", "Last")])?;

    let results = runner
        .run_selected(vec![contact], args.tag.as_deref(), args.name.as_deref())
        .await?;
    runner.write_results(&results)?;

    Ok(results.is_success())
}
