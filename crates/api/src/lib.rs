//! Sitecheck HTTP scenarios
//!
//! Exercises a JSONPlaceholder-style `/users` resource:
//! - `client`: one request per call, raw status and body
//! - `expect`: status, count, value and record assertions
//! - `scenarios`: the catalogue of create/read/update/delete scenarios
//! - `runner`: sequential execution and result aggregation
//! - `stub`: in-memory copy of the service for offline runs

pub mod client;
pub mod config;
pub mod error;
pub mod expect;
pub mod runner;
pub mod scenarios;
pub mod stub;

pub use client::{ApiResponse, UsersClient};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use runner::{ApiRunner, Outcome, ScenarioResult, SuiteResult};
pub use scenarios::{catalogue, Expectation, Scenario, ScenarioKind};
pub use stub::StubServer;
