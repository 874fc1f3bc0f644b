//! Structured logging for search flows
//!
//! Every significant event is emitted through `tracing` with an `event`
//! field so JSON output can be filtered by kind.

use tracing::{info, warn};

use crate::error::{FetchError, ServiceError};
use crate::models::{AggregatedRouteStats, FlightSearchInput, PredictionResult, RiskLevel};

/// Structured logger for client events
///
/// Carries the service endpoint so log lines from several configured
/// backends can be told apart.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    endpoint: String,
}

impl StructuredLogger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Log a prediction request about to be sent
    pub fn log_prediction_request(&self, input: &FlightSearchInput) {
        info!(
            event = "prediction_requested",
            endpoint = %self.endpoint,
            airline = %input.airline,
            origin = %input.origin_airport,
            destination = %input.destination_airport,
            date = %input.date_string(),
            scheduled_departure = input.scheduled_departure,
            scheduled_time = input.scheduled_time,
            distance = input.distance,
            "Sending prediction request"
        );
    }

    /// Log a prediction received from the service
    pub fn log_prediction(&self, input: &FlightSearchInput, prediction: &PredictionResult) {
        info!(
            event = "prediction_received",
            endpoint = %self.endpoint,
            airline = %input.airline,
            origin = %input.origin_airport,
            destination = %input.destination_airport,
            delay_probability = prediction.delay_probability,
            is_delayed = prediction.is_delayed,
            prediction_text = %prediction.prediction_text,
            confidence = prediction.confidence,
            risk = ?RiskLevel::from_prediction(prediction),
            "Received delay prediction"
        );
    }

    /// Log a failed prediction call
    pub fn log_prediction_failure(&self, input: &FlightSearchInput, error: &ServiceError) {
        warn!(
            event = "prediction_failed",
            endpoint = %self.endpoint,
            origin = %input.origin_airport,
            destination = %input.destination_airport,
            status = ?error.status(),
            error = %error,
            "Prediction request failed"
        );
    }

    /// Log that the follow-up route flights fetch failed
    pub fn log_route_flights_failure(&self, origin: &str, destination: &str, error: &ServiceError) {
        warn!(
            event = "route_flights_failed",
            endpoint = %self.endpoint,
            origin = %origin,
            destination = %destination,
            error = %error,
            "Could not load route flights"
        );
    }

    /// Log a carrier left out of a route summary
    pub fn log_route_overview_failure(&self, origin: &str, destination: &str, error: &ServiceError) {
        warn!(
            event = "route_overview_failed",
            endpoint = %self.endpoint,
            origin = %origin,
            destination = %destination,
            error = %error,
            "Could not load route overview"
        );
    }

    pub fn log_carrier_failure(&self, origin: &str, destination: &str, error: &FetchError) {
        warn!(
            event = "carrier_query_failed",
            endpoint = %self.endpoint,
            carrier = %error.carrier,
            origin = %origin,
            destination = %destination,
            error = %error.source,
            "No route data for carrier"
        );
    }

    /// Log the outcome of a route search
    pub fn log_route_summary(
        &self,
        origin: &str,
        destination: &str,
        carriers_reporting: usize,
        stats: Option<&AggregatedRouteStats>,
    ) {
        match stats {
            Some(stats) => info!(
                event = "route_summarized",
                endpoint = %self.endpoint,
                origin = %origin,
                destination = %destination,
                carriers_reporting = carriers_reporting,
                total_flights = stats.total_flights,
                avg_arrival_delay = stats.avg_arrival_delay,
                avg_departure_delay = stats.avg_departure_delay,
                "Route analysis complete"
            ),
            None => warn!(
                event = "route_no_data",
                endpoint = %self.endpoint,
                origin = %origin,
                destination = %destination,
                "No flight data found for route"
            ),
        }
    }

    /// Log a chat exchange
    pub fn log_chat(&self, portal: &str, history_len: usize, ok: bool) {
        if ok {
            info!(
                event = "chat_reply",
                endpoint = %self.endpoint,
                portal = %portal,
                history_len = history_len,
                "Chat assistant replied"
            );
        } else {
            warn!(
                event = "chat_failed",
                endpoint = %self.endpoint,
                portal = %portal,
                history_len = history_len,
                "Chat assistant request failed"
            );
        }
    }
}
