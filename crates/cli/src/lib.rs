//! Sitecheck CLI
//!
//! Command-line front end for record generation, the HTTP scenarios, the
//! local stub service and the browser scenarios.

pub mod commands;
pub mod config;
pub mod output;
