//! HTTP scenarios against the `/users` service

use anyhow::Result;
use clap::Args;
use sitecheck_api::{runner::write_results, ApiConfig, ApiRunner, StubServer};

use crate::config::SuiteConfig;
use crate::output::{api_summary, print_error, print_info, print_list, print_success, print_warning, OutputFormat};

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Base URL of the service (overrides the config file)
    #[arg(long, env = "SITECHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Run only scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Treat recorded environment failures as failures
    #[arg(long)]
    pub strict: bool,

    /// Seed the record generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run against an in-process stub instead of a remote service.
    /// Takes precedence over any base URL.
    #[arg(long)]
    pub local: bool,
}

/// API settings after applying command-line overrides
pub fn api_config(args: &UsersArgs, config: &SuiteConfig) -> Result<ApiConfig> {
    let mut api = config.api.clone();
    if args.local {
        return Ok(api);
    }
    if let Some(url) = &args.base_url {
        api.base_url = url.trim_end_matches('/').to_string();
    }
    api.validate()?;
    Ok(api)
}

/// Returns whether the suite passed
pub async fn execute(args: UsersArgs, config: &SuiteConfig, format: OutputFormat) -> Result<bool> {
    let mut api = api_config(&args, config)?;

    // Kept alive until the run finishes
    let _stub = if args.local {
        let stub = StubServer::spawn("127.0.0.1:0").await?;
        api.base_url = stub.base_url();
        print_info(&format!("Started local stub at {}", api.base_url));
        Some(stub)
    } else {
        None
    };

    let mut runner = ApiRunner::new(&api)?;
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }

    let suite = match &args.filter {
        Some(pattern) => runner.run_matching(pattern).await?,
        None => runner.run_all().await?,
    };

    print_list(&suite.results, format);
    write_results(&config.output_dir, &suite)?;

    let summary = api_summary(&suite);
    let success = suite.is_success(args.strict);
    if !success {
        print_error(&summary);
    } else if suite.known_failures > 0 || suite.unexpected_passes > 0 {
        print_warning(&summary);
    } else {
        print_success(&summary);
    }
    Ok(success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cmd {
        #[command(flatten)]
        users: UsersArgs,
    }

    fn args(base_url: Option<&str>) -> UsersArgs {
        UsersArgs {
            base_url: base_url.map(String::from),
            filter: None,
            strict: false,
            seed: None,
            local: false,
        }
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let config = SuiteConfig::default();
        let api = api_config(&args(Some("http://127.0.0.1:3000/")), &config).unwrap();
        assert_eq!(api.base_url, "http://127.0.0.1:3000");
        assert_eq!(api.timeout_secs, config.api.timeout_secs);
    }

    #[test]
    fn test_config_file_used_without_flag() {
        let mut config = SuiteConfig::default();
        config.api.base_url = "http://stub.local".to_string();
        assert_eq!(api_config(&args(None), &config).unwrap().base_url, "http://stub.local");
    }

    #[test]
    fn test_bad_override_rejected() {
        assert!(api_config(&args(Some("localhost:3000")), &SuiteConfig::default()).is_err());
    }

    #[test]
    fn test_local_accepted_alongside_base_url() {
        let cmd = Cmd::try_parse_from(["users", "--local", "--base-url", "localhost:3000"]).unwrap();
        assert!(cmd.users.local);
        // The stub replaces the URL, so a bad one is not an error
        assert!(api_config(&cmd.users, &SuiteConfig::default()).is_ok());
    }
}
