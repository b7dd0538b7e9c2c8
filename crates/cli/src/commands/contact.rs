//! Browser scenarios for the contact form

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sitecheck_e2e::{Browser, ContactForm, PlaywrightConfig, RunnerConfig, TestRunner, TestSpec};

use crate::config::SuiteConfig;
use crate::output::{browser_summary, print_error, print_list, print_success, OutputFormat};

#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Also run the YAML specs in this directory
    #[arg(long)]
    pub specs: Option<PathBuf>,

    /// Run only tests with this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run only the test with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, env = "SITECHECK_BROWSER")]
    pub browser: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Print the generated contact form spec as YAML instead of running it
    #[arg(long)]
    pub emit: bool,
}

/// Built-in contact form scenario: only the name fields are filled in
pub fn contact_spec() -> Result<TestSpec> {
    Ok(ContactForm::prometheus_group()
        .validation_spec(&[("First Name", "First"), ("Last Name", "Last")])?)
}

/// Runner for the configured browser, directories and node project
pub fn runner(args: &ContactArgs, config: &SuiteConfig) -> Result<TestRunner> {
    let browser = args
        .browser
        .as_deref()
        .unwrap_or(&config.browser.browser)
        .parse::<Browser>()?;

    Ok(TestRunner::with_config(RunnerConfig {
        playwright: PlaywrightConfig {
            browser,
            headless: config.browser.headless && !args.headed,
            working_dir: config.browser.node_dir.clone(),
            screenshot_dir: config.output_dir.join("screenshots"),
            ..Default::default()
        },
        specs_dir: args.specs.clone().unwrap_or_else(|| config.browser.specs_dir.clone()),
        output_dir: config.output_dir.clone(),
    }))
}

/// Returns whether every test passed
pub async fn execute(args: ContactArgs, config: &SuiteConfig, format: OutputFormat) -> Result<bool> {
    if args.emit {
        print!("{}", contact_spec()?.to_yaml()?);
        return Ok(true);
    }

    let runner = runner(&args, config)?;
    let suite = runner
        .run_selected(vec![contact_spec()?], args.tag.as_deref(), args.name.as_deref())
        .await?;
    print_list(&suite.results, format);
    runner.write_results(&suite)?;

    let summary = browser_summary(&suite);
    if suite.is_success() {
        print_success(&summary);
    } else {
        print_error(&summary);
    }
    Ok(suite.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ContactArgs {
        ContactArgs {
            specs: None,
            tag: None,
            name: None,
            browser: None,
            headed: false,
            emit: false,
        }
    }

    #[test]
    fn test_builtin_spec_selected_without_specs_dir() {
        let mut config = SuiteConfig::default();
        config.browser.specs_dir = PathBuf::from("/nonexistent/specs");
        let specs = runner(&args(), &config)
            .unwrap()
            .select_specs(vec![contact_spec().unwrap()], None, None)
            .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "contact-us-required-fields");
    }

    #[test]
    fn test_yaml_specs_filtered_by_tag() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("smoke.yaml"),
            "name: smoke\ntags: [smoke]\nsteps:\n  - action: navigate\n    url: /\n",
        )
        .unwrap();

        let args = ContactArgs {
            specs: Some(dir.path().to_path_buf()),
            tag: Some("smoke".to_string()),
            ..args()
        };
        let specs = runner(&args, &SuiteConfig::default())
            .unwrap()
            .select_specs(vec![contact_spec().unwrap()], args.tag.as_deref(), None)
            .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "smoke");
    }

    #[test]
    fn test_unknown_browser_rejected() {
        let args = ContactArgs {
            browser: Some("lynx".to_string()),
            ..args()
        };
        assert!(runner(&args, &SuiteConfig::default()).is_err());
    }
}
