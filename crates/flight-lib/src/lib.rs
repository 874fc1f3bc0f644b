//! Client library for the flight delay prediction service
//!
//! This crate provides:
//! - Search input validation and HHMM departure encoding
//! - An HTTP client for the prediction, route and chat endpoints
//! - The prediction flow with its dependent route flights fetch
//! - Per-carrier route collection and weighted route aggregation
//! - A session context holding the chat transcript
//! - Structured logging with tracing

pub mod aggregator;
pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod observability;
pub mod orchestrator;
pub mod route;
pub mod search;
pub mod session;

#[cfg(test)]
mod mock;

pub use aggregator::aggregate;
pub use client::{FlightApi, HttpFlightApi};
pub use error::{FetchError, SearchError, ServiceError, ValidationError};
pub use models::*;
pub use observability::StructuredLogger;
pub use orchestrator::{predict, run_prediction, PredictionOutcome};
pub use route::{collect_route_performance, search_route, FetchMode, RouteReport, DEFAULT_CARRIERS};
pub use search::{encode_departure, SearchForm};
pub use session::Session;
