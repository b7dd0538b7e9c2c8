//! Sitecheck browser scenarios
//!
//! Declarative YAML specs are compiled into Playwright scripts and executed
//! in one browser session per spec.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TestRunner                                                 │
//! │    ├── load specs (YAML) / ContactForm::validation_spec()   │
//! │    ├── PlaywrightHandle::run_spec(spec) -> [StepResult]     │
//! │    └── write_results() -> e2e-results.json                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec                                                   │
//! │    ├── name, description, tags, viewport                    │
//! │    └── steps: navigate | click | fill | press | select |    │
//! │               wait | sleep | expect | screenshot | log      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod contact_form;
pub mod error;
pub mod playwright;
pub mod runner;
pub mod spec;

pub use contact_form::{ContactForm, REQUIRED_FIELD_MESSAGE, SUMMARY_MESSAGE};
pub use error::{E2eError, E2eResult};
pub use playwright::{Browser, PlaywrightConfig};
pub use runner::{RunnerConfig, TestResult, TestRunner, TestSuiteResult};
pub use spec::{TestSpec, TestStep};
