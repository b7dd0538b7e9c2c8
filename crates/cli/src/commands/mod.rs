//! CLI Commands

pub mod contact;
pub mod generate;
pub mod stub;
pub mod users;
