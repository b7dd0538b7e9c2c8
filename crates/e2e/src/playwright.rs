//! Playwright browser automation
//!
//! A spec is compiled into a single Node script so every step shares one
//! browser session. The script prints one JSON line per completed step and a
//! final JSON line for the failing step, if any; everything else it prints is
//! forwarded to the log.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::spec::{Check, Locator, LocatorPart, TestSpec, TestStep};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(E2eError::Playwright(format!("unknown browser '{}'", other))),
        }
    }
}

/// Result of executing a test step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// One-based position in the test
    pub step: usize,
    pub step_name: String,
    pub success: bool,
    pub duration_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub screenshot_path: Option<PathBuf>,
}

/// Playwright browser handle
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        // Verify playwright is installed
        Self::check_playwright_installed(&config)?;

        std::fs::create_dir_all(&config.screenshot_dir)?;

        Ok(Self { config: config.anchored()? })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed(config: &PlaywrightConfig) -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .current_dir(&config.working_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Run every step of `spec` in one browser session.
    ///
    /// Returns the results of the steps that ran; a failing step is the last
    /// entry. Steps after it are not attempted.
    pub async fn run_spec(&self, spec: &TestSpec) -> E2eResult<Vec<StepResult>> {
        let script = build_script(&self.config, spec);

        // Written next to node_modules so `require` resolves
        let script_file = tempfile::Builder::new()
            .prefix("sitecheck-")
            .suffix(".js")
            .tempfile_in(&self.config.working_dir)?;
        std::fs::write(script_file.path(), &script)?;

        debug!("Running Playwright script: {}", script_file.path().display());

        let start = Instant::now();
        let output = TokioCommand::new("node")
            .arg(script_file.path())
            .current_dir(&self.config.working_dir)
            .output()
            .await?;
        debug!("Script finished in {} ms", start.elapsed().as_millis());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut results = parse_progress(&stdout);

        for (i, result) in results.iter_mut().enumerate() {
            if let Some(TestStep::Screenshot { name, .. }) = spec.steps.get(i) {
                if result.success {
                    result.screenshot_path = Some(self.screenshot_path(name));
                }
            }
        }

        let failed = results.last().map(|r| !r.success).unwrap_or(false);
        if !output.status.success() && !failed {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(results)
    }

    fn screenshot_path(&self, name: &str) -> PathBuf {
        self.config.screenshot_dir.join(format!("{}.png", name))
    }
}

/// Collect step results from script output, logging anything else
fn parse_progress(stdout: &str) -> Vec<StepResult> {
    let mut results = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<StepResult>(line) {
            Ok(result) => {
                if let Some(error) = &result.error {
                    warn!("step {} ({}) failed: {}", result.step, result.step_name, error);
                }
                results.push(result);
            }
            Err(_) => info!("{}", line),
        }
    }
    results
}

/// JavaScript string literal for `s`
fn js_str(s: &str) -> String {
    // A JSON string is a valid JS string literal
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// JavaScript expression evaluating to a Playwright locator
pub fn locator_js(locator: &Locator) -> String {
    let mut js = String::from("page");
    for part in &locator.0 {
        match part {
            LocatorPart::Css(selector) => js.push_str(&format!(".locator({})", js_str(selector))),
            LocatorPart::Role { role, name: Some(name) } => js.push_str(&format!(
                ".getByRole({}, {{ name: {} }})",
                js_str(role.as_str()),
                js_str(name)
            )),
            LocatorPart::Role { role, name: None } => {
                js.push_str(&format!(".getByRole({})", js_str(role.as_str())))
            }
            LocatorPart::Label(label) => js.push_str(&format!(".getByLabel({})", js_str(label))),
            LocatorPart::Text(text) => js.push_str(&format!(".getByText({})", js_str(text))),
            LocatorPart::HasText(text) => {
                js.push_str(&format!(".filter({{ hasText: {} }})", js_str(text)))
            }
            LocatorPart::Nth(n) => js.push_str(&format!(".nth({})", n)),
        }
    }
    js
}

/// One `expect` line per populated field of `check`
fn check_js(target: &str, check: &Check) -> Vec<String> {
    let mut lines = Vec::new();

    match check.visible {
        Some(true) => lines.push(format!("await expect({}).toBeVisible();", target)),
        Some(false) => lines.push(format!("await expect({}).toBeHidden();", target)),
        None => {}
    }
    if let Some(text) = &check.text {
        lines.push(format!("await expect({}).toHaveText({});", target, js_str(text)));
    }
    if let Some(text) = &check.contains_text {
        lines.push(format!("await expect({}).toContainText({});", target, js_str(text)));
    }
    if let Some(attr) = &check.attribute {
        lines.push(format!(
            "await expect({}).toHaveAttribute({}, {});",
            target,
            js_str(&attr.name),
            js_str(&attr.value)
        ));
    }
    if let Some(attr) = &check.not_attribute {
        lines.push(format!(
            "await expect({}).not.toHaveAttribute({}, {});",
            target,
            js_str(&attr.name),
            js_str(&attr.value)
        ));
    }
    if let Some(value) = &check.value {
        lines.push(format!("await expect({}).toHaveValue({});", target, js_str(value)));
    }
    match check.empty {
        Some(true) => lines.push(format!("await expect({}).toBeEmpty();", target)),
        Some(false) => lines.push(format!("await expect({}).not.toBeEmpty();", target)),
        None => {}
    }
    if let Some(count) = check.count {
        lines.push(format!("await expect({}).toHaveCount({});", target, count));
    }

    lines
}

/// Convert a step to JavaScript statements
fn step_to_js(config: &PlaywrightConfig, step: &TestStep) -> Vec<String> {
    match step {
        TestStep::Navigate { url, wait_for } => {
            let target = if url.starts_with("http://") || url.starts_with("https://") {
                js_str(url)
            } else {
                format!("baseUrl + {}", js_str(url))
            };
            let mut lines = vec![format!("await page.goto({});", target)];
            if let Some(locator) = wait_for {
                lines.push(format!("await {}.waitFor();", locator_js(locator)));
            }
            lines
        }
        TestStep::Click { target, timeout_ms } => {
            let timeout = timeout_ms.unwrap_or(config.action_timeout_ms);
            vec![format!("await {}.click({{ timeout: {} }});", locator_js(target), timeout)]
        }
        TestStep::Fill { target, value } => {
            vec![format!("await {}.fill({});", locator_js(target), js_str(value))]
        }
        TestStep::Press { target, key } => match target {
            Some(locator) => vec![format!("await {}.press({});", locator_js(locator), js_str(key))],
            None => vec![format!("await page.keyboard.press({});", js_str(key))],
        },
        TestStep::Select { target, value } => {
            vec![format!("await {}.selectOption({});", locator_js(target), js_str(value))]
        }
        TestStep::Wait { target, timeout_ms, state } => vec![format!(
            "await {}.waitFor({{ state: {}, timeout: {} }});",
            locator_js(target),
            js_str(state.as_str()),
            timeout_ms
        )],
        TestStep::Sleep { ms } => vec![format!("await page.waitForTimeout({});", ms)],
        TestStep::Expect { target, check } => check_js(&locator_js(target), check),
        TestStep::Screenshot { name, full_page } => {
            let path = config.screenshot_dir.join(format!("{}.png", name));
            vec![format!(
                "await page.screenshot({{ path: {}, fullPage: {} }});",
                js_str(&path.to_string_lossy()),
                full_page
            )]
        }
        TestStep::Log { message } => {
            vec![format!("console.log({});", js_str(&format!("[TEST] {}", message)))]
        }
    }
}

/// Build the Playwright script for a whole spec
pub fn build_script(config: &PlaywrightConfig, spec: &TestSpec) -> String {
    let mut script = String::new();

    // Header
    script.push_str(&format!(
        r#"const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultTimeout({timeout});
  const baseUrl = {base_url};
  let step = 0;
  let stepName = '';
  let started = Date.now();
  const begin = (index, name) => {{ step = index; stepName = name; started = Date.now(); }};
  const done = () => console.log(JSON.stringify({{ step, step_name: stepName, success: true, duration_ms: Date.now() - started }}));

  try {{
"#,
        browser = config.browser.as_str(),
        headless = config.headless,
        width = spec.viewport.width,
        height = spec.viewport.height,
        timeout = config.action_timeout_ms,
        base_url = js_str(&config.base_url),
    ));

    // Generate step code
    for (i, step) in spec.steps.iter().enumerate() {
        let index = i + 1;
        script.push_str(&format!("\n    // Step {}: {}\n", index, step.name()));
        script.push_str(&format!("    begin({}, {});\n", index, js_str(&step.name())));
        for line in step_to_js(config, step) {
            script.push_str("    ");
            script.push_str(&line);
            script.push('\n');
        }
        script.push_str("    done();\n");
    }

    // Footer
    script.push_str(
        r#"  } catch (error) {
    console.log(JSON.stringify({ step, step_name: stepName, success: false, duration_ms: Date.now() - started, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
    );

    script
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    /// Prefix for relative navigation URLs
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    /// Directory whose node_modules provides playwright
    pub working_dir: PathBuf,
    pub browser: Browser,
    pub headless: bool,
    /// Default timeout for actions and expectations
    pub action_timeout_ms: u64,
}

impl PlaywrightConfig {
    /// Resolve `screenshot_dir` against the current directory. The script runs
    /// from `working_dir`, so a relative path would land somewhere else.
    pub fn anchored(mut self) -> E2eResult<Self> {
        self.screenshot_dir = std::path::absolute(&self.screenshot_dir)?;
        Ok(self)
    }
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            working_dir: PathBuf::from("."),
            browser: Browser::Chromium,
            headless: true,
            action_timeout_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{AriaRole, Viewport};

    fn spec(steps: Vec<TestStep>) -> TestSpec {
        TestSpec {
            name: "script".to_string(),
            description: String::new(),
            tags: vec![],
            viewport: Viewport { width: 1024, height: 768 },
            steps,
        }
    }

    #[test]
    fn test_locator_chain_js() {
        let locator = Locator::css("[data-test-id=\"hsForm_1\"] div")
            .has_text("Phone number*")
            .get_by_role(AriaRole::Alert, None);
        assert_eq!(
            locator_js(&locator),
            r#"page.locator("[data-test-id=\"hsForm_1\"] div").filter({ hasText: "Phone number*" }).getByRole("alert")"#
        );
    }

    #[test]
    fn test_role_with_name_js() {
        let locator = Locator::role(AriaRole::Textbox, Some("First Name*")).nth(0);
        assert_eq!(
            locator_js(&locator),
            r#"page.getByRole("textbox", { name: "First Name*" }).nth(0)"#
        );
    }

    #[test]
    fn test_check_emits_one_line_per_field() {
        let check = Check {
            text: Some("Please complete this required field.".to_string()),
            count: Some(1),
            ..Default::default()
        };
        let lines = check_js("page.getByRole(\"alert\")", &check);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("toHaveText(\"Please complete this required field.\")"));
        assert!(lines[1].contains("toHaveCount(1)"));
    }

    #[test]
    fn test_negated_attribute() {
        let lines = check_js("x", &Check::no_attribute("required", ""));
        assert_eq!(lines, vec![r#"await expect(x).not.toHaveAttribute("required", "");"#]);
    }

    #[test]
    fn test_script_escapes_quotes_and_reports_steps() {
        let config = PlaywrightConfig {
            base_url: "https://example.com".to_string(),
            ..Default::default()
        };
        let script = build_script(
            &config,
            &spec(vec![
                TestStep::Navigate { url: "/contact".to_string(), wait_for: None },
                TestStep::Fill {
                    target: Locator::label("Comments"),
                    value: "it's \"quoted\"".to_string(),
                },
            ]),
        );

        assert!(script.contains("require('@playwright/test')"));
        assert!(script.contains("await page.goto(baseUrl + \"/contact\");"));
        assert!(script.contains(r#".fill("it's \"quoted\"");"#));
        assert!(script.contains("begin(2, \"fill:label=Comments\");"));
        assert!(script.contains("width: 1024, height: 768"));
        assert_eq!(script.matches("done();").count(), 2);
    }

    #[test]
    fn test_absolute_navigation_ignores_base_url() {
        let lines = step_to_js(
            &PlaywrightConfig::default(),
            &TestStep::Navigate { url: "https://www.example.com/".to_string(), wait_for: None },
        );
        assert_eq!(lines, vec![r#"await page.goto("https://www.example.com/");"#]);
    }

    #[test]
    fn test_parse_progress_lines() {
        let stdout = r#"{"step":1,"step_name":"navigate:/","success":true,"duration_ms":120}
[TEST] hello
{"step":2,"step_name":"click:link[Contact Sales]","success":false,"duration_ms":5001,"error":"Timeout 5000ms exceeded"}
"#;
        let results = parse_progress(stdout);
        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].error.as_deref(), Some("Timeout 5000ms exceeded"));
    }

    #[test]
    fn test_screenshots_saved_where_reported() {
        let config = PlaywrightConfig {
            working_dir: PathBuf::from("/opt/node_project"),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            ..Default::default()
        }
        .anchored()
        .unwrap();

        let expected = std::env::current_dir().unwrap().join("test-results/screenshots");
        assert!(config.screenshot_dir.is_absolute());
        assert_eq!(config.screenshot_dir, expected);

        let script = build_script(
            &config,
            &spec(vec![TestStep::Screenshot { name: "shot".to_string(), full_page: false }]),
        );
        let path = expected.join("shot.png");
        assert!(script.contains(&format!("path: {}", js_str(&path.to_string_lossy()))));
    }

    #[test]
    fn test_browser_from_str() {
        assert_eq!("firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert!("lynx".parse::<Browser>().is_err());
    }
}
