//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use sitecheck_api::{Outcome, ScenarioResult, SuiteResult};
use sitecheck_common::PersonRecord;
use sitecheck_e2e::{TestResult, TestSuiteResult};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for PersonRecord {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Username", "Email", "Phone", "City", "Company"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            self.name.clone(),
            self.username.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.city.clone(),
            self.company.name.clone(),
        ]
    }
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Passed => "passed".green().to_string(),
        Outcome::Failed => "FAILED".red().bold().to_string(),
        Outcome::KnownFailure => "known failure".yellow().to_string(),
        Outcome::UnexpectedPass => "unexpected pass".cyan().to_string(),
    }
}

impl TableDisplay for ScenarioResult {
    fn headers() -> Vec<&'static str> {
        vec!["Scenario", "Outcome", "Duration", "Detail"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            outcome_label(self.outcome),
            format!("{} ms", self.duration_ms),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

impl TableDisplay for TestResult {
    fn headers() -> Vec<&'static str> {
        vec!["Test", "Result", "Steps", "Duration", "Error"]
    }

    fn row(&self) -> Vec<String> {
        let passed = self.steps.iter().filter(|s| s.success).count();
        vec![
            self.name.clone(),
            if self.success {
                "passed".green().to_string()
            } else {
                "FAILED".red().bold().to_string()
            },
            format!("{}/{}", passed, self.steps.len()),
            format!("{} ms", self.duration_ms),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_plain<T: TableDisplay>(item: &T) {
    for (header, value) in T::headers().iter().zip(item.row().iter()) {
        println!("{}: {}", header, value);
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    if items.is_empty() && format != OutputFormat::Json {
        println!("No items found.");
        return;
    }

    match format {
        OutputFormat::Table => {
            let mut table = table();
            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(items).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                print_plain(item);
            }
        }
    }
}

/// One-line summary of an API suite
pub fn api_summary(suite: &SuiteResult) -> String {
    format!(
        "{} scenarios against {}: {} passed, {} failed, {} known failures, {} unexpected passes ({} ms)",
        suite.total,
        suite.base_url,
        suite.passed,
        suite.failed,
        suite.known_failures,
        suite.unexpected_passes,
        suite.duration_ms
    )
}

/// One-line summary of a browser suite
pub fn browser_summary(suite: &TestSuiteResult) -> String {
    format!(
        "{} browser tests: {} passed, {} failed ({} ms)",
        suite.total, suite.passed, suite.failed, suite.duration_ms
    )
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("⚠️  {}", message.yellow());
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}
