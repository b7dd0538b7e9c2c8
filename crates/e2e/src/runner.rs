//! Runs browser specs through Playwright and aggregates their results

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::{E2eError, E2eResult};
use crate::playwright::{PlaywrightConfig, PlaywrightHandle, StepResult};
use crate::spec::TestSpec;

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
}

impl TestResult {
    fn from_steps(name: &str, duration_ms: u64, steps: Vec<StepResult>, expected: usize) -> Self {
        let error = match steps.iter().find(|s| !s.success) {
            Some(failed) => Some(
                E2eError::StepFailed {
                    index: failed.step,
                    step: failed.step_name.clone(),
                    reason: failed.error.clone().unwrap_or_else(|| "unknown error".to_string()),
                }
                .to_string(),
            ),
            None if steps.len() < expected => Some(format!(
                "only {} of {} steps reported",
                steps.len(),
                expected
            )),
            None => None,
        };

        Self {
            name: name.to_string(),
            success: error.is_none(),
            duration_ms,
            steps,
            error,
        }
    }
}

/// Result of running all tests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn from_results(results: Vec<TestResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
            results,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Browser test runner
pub struct TestRunner {
    playwright_config: PlaywrightConfig,

    /// Test specs directory
    specs_dir: PathBuf,

    /// Output directory for results
    output_dir: PathBuf,
}

impl TestRunner {
    /// Create a test runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            playwright_config: config.playwright,
            specs_dir: config.specs_dir,
            output_dir: config.output_dir,
        }
    }

    /// Specs in the specs directory, if it exists, followed by `extra`,
    /// narrowed to `tag` and `name` when given
    pub fn select_specs(
        &self,
        extra: Vec<TestSpec>,
        tag: Option<&str>,
        name: Option<&str>,
    ) -> E2eResult<Vec<TestSpec>> {
        let mut specs = if self.specs_dir.is_dir() {
            TestSpec::load_all(&self.specs_dir)?
        } else {
            debug!("No specs directory at {}", self.specs_dir.display());
            Vec::new()
        };
        specs.extend(extra);

        if let Some(tag) = tag {
            specs = TestSpec::filter_by_tag(&specs, tag).into_iter().cloned().collect();
        }
        if let Some(name) = name {
            specs.retain(|s| s.name == name);
            if specs.is_empty() {
                return Err(E2eError::SpecParse(format!("Test not found: {}", name)));
            }
        }
        Ok(specs)
    }

    /// Run the specs picked by [`select_specs`](Self::select_specs)
    pub async fn run_selected(
        &self,
        extra: Vec<TestSpec>,
        tag: Option<&str>,
        name: Option<&str>,
    ) -> E2eResult<TestSuiteResult> {
        let specs = self.select_specs(extra, tag, name)?;
        self.run_specs(&specs).await
    }

    /// Run a list of test specs
    pub async fn run_specs(&self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();

        info!("Running {} test(s)...", specs.len());

        for spec in specs {
            let result = match self.run_spec(spec).await {
                Ok(result) => result,
                Err(e @ E2eError::PlaywrightNotFound) => return Err(e),
                Err(e) => TestResult {
                    name: spec.name.clone(),
                    success: false,
                    duration_ms: 0,
                    steps: vec![],
                    error: Some(e.to_string()),
                },
            };

            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let suite = TestSuiteResult::from_results(results, start.elapsed().as_millis() as u64);

        info!("");
        info!(
            "Test Results: {} passed, {} failed ({} ms)",
            suite.passed, suite.failed, suite.duration_ms
        );

        Ok(suite)
    }

    /// Run a single test spec
    pub async fn run_spec(&self, spec: &TestSpec) -> E2eResult<TestResult> {
        let start = Instant::now();
        debug!("Running test: {}", spec.name);

        let playwright = PlaywrightHandle::new(self.playwright_config.clone())?;
        let steps = playwright.run_spec(spec).await?;

        Ok(TestResult::from_steps(
            &spec.name,
            start.elapsed().as_millis() as u64,
            steps,
            spec.steps.len(),
        ))
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("e2e-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub playwright: PlaywrightConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            playwright: PlaywrightConfig::default(),
            specs_dir: PathBuf::from("crates/e2e/specs"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}
