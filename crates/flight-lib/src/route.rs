//! Per-carrier route performance collection
//!
//! Each carrier is queried independently. A carrier whose query fails is
//! dropped from the summary; it never stops the others from being collected.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::aggregator::aggregate;
use crate::client::FlightApi;
use crate::error::{FetchError, ValidationError};
use crate::models::{AggregatedRouteStats, RoutePerformanceRecord};
use crate::observability::StructuredLogger;
use crate::search::{ensure_distinct, normalize_code};

/// Carriers queried for a route summary, in query order
pub const DEFAULT_CARRIERS: [&str; 4] = ["AA", "DL", "UA", "WN"];

/// How carrier queries are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One at a time, in carrier order
    #[default]
    Sequential,
    /// All at once, joined before aggregation
    Concurrent,
}

/// Outcome of one carrier query
pub type CarrierResult = Result<RoutePerformanceRecord, FetchError>;

/// Route summary with the carriers that contributed to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub origin: String,
    pub destination: String,
    /// Carriers that returned data, in query order
    pub carriers: Vec<String>,
    /// `None` when no carrier had data for the route
    pub stats: Option<AggregatedRouteStats>,
}

impl RouteReport {
    pub fn has_data(&self) -> bool {
        self.stats.is_some()
    }
}

/// Query every carrier, returning one result per carrier in carrier order
pub async fn collect_route_performance<A: FlightApi + ?Sized>(
    api: &A,
    origin: &str,
    destination: &str,
    carriers: &[String],
    mode: FetchMode,
) -> Vec<(String, CarrierResult)> {
    let query = |carrier: &String| {
        let carrier = carrier.clone();
        async move {
            let result = api
                .route_performance(&carrier, origin, destination)
                .await
                .map_err(|source| FetchError {
                    carrier: carrier.clone(),
                    source,
                });
            (carrier, result)
        }
    };

    match mode {
        FetchMode::Sequential => {
            let mut results = Vec::with_capacity(carriers.len());
            for carrier in carriers {
                results.push(query(carrier).await);
            }
            results
        }
        FetchMode::Concurrent => join_all(carriers.iter().map(query)).await,
    }
}

/// Discard failed carriers, logging each one
pub fn successful_records(
    results: Vec<(String, CarrierResult)>,
    logger: &StructuredLogger,
    origin: &str,
    destination: &str,
) -> (Vec<String>, Vec<RoutePerformanceRecord>) {
    let mut carriers = Vec::new();
    let mut records = Vec::new();

    for (carrier, result) in results {
        match result {
            Ok(record) => {
                carriers.push(carrier);
                records.push(record);
            }
            Err(err) => logger.log_carrier_failure(origin, destination, &err),
        }
    }

    (carriers, records)
}

/// Validate a route, collect carrier data and aggregate it
pub async fn search_route<A: FlightApi + ?Sized>(
    api: &A,
    logger: &StructuredLogger,
    origin: Option<String>,
    destination: Option<String>,
    carriers: &[String],
    mode: FetchMode,
) -> Result<RouteReport, ValidationError> {
    let origin = normalize_code(origin, "origin")?;
    let destination = normalize_code(destination, "destination")?;
    ensure_distinct(&origin, &destination)?;

    let results = collect_route_performance(api, &origin, &destination, carriers, mode).await;
    let (carriers, records) = successful_records(results, logger, &origin, &destination);
    let stats = aggregate(&records);

    logger.log_route_summary(&origin, &destination, carriers.len(), stats.as_ref());

    Ok(RouteReport {
        origin,
        destination,
        carriers,
        stats,
    })
}

/// Default carrier list as owned codes
pub fn default_carriers() -> Vec<String> {
    DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect()
}
