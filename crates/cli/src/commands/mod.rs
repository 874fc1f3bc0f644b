//! CLI subcommand implementations

pub mod airline;
pub mod catalog;
pub mod chat;
pub mod predict;
pub mod route;
