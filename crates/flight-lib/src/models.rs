//! Core data models for the flight delay client
//!
//! Field names on the wire types are part of the service contract and
//! must not be renamed.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Delay bucket labels, in display order
pub const BUCKET_0_15: &str = "0-15min";
pub const BUCKET_15_60: &str = "15-60min";
pub const BUCKET_60_PLUS: &str = "60+min";

/// A validated flight search, ready to be sent to `/predict`
///
/// This is also the exact request body of the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub airline: String,
    pub origin_airport: String,
    pub destination_airport: String,
    /// Packed HHMM, e.g. 13:45 is 1345
    pub scheduled_departure: u32,
    /// Scheduled block time in minutes
    pub scheduled_time: u32,
    pub distance: u32,
}

impl FlightSearchInput {
    /// Date in `YYYY-MM-DD` form, as used by the route flights endpoint
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Prediction returned by the model service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub delay_probability: f64,
    #[serde(default)]
    pub is_delayed: bool,
    #[serde(default = "unknown_prediction_text")]
    pub prediction_text: String,
    #[serde(default)]
    pub confidence: f64,
}

fn unknown_prediction_text() -> String {
    "UNKNOWN".to_string()
}

/// Envelope of the `/predict` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: PredictionResult,
}

/// Coarse risk band shown next to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Probability above which a non-delayed prediction is still flagged
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;

impl RiskLevel {
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        if prediction.is_delayed {
            RiskLevel::High
        } else if prediction.delay_probability > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk - Delay Expected",
        }
    }
}

/// Per-bucket delay counts (or percentages, depending on the endpoint)
///
/// Buckets absent from a response decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayDistribution {
    #[serde(rename = "0-15min", default)]
    pub under_15: f64,
    #[serde(rename = "15-60min", default)]
    pub from_15_to_60: f64,
    #[serde(rename = "60+min", default)]
    pub over_60: f64,
}

impl DelayDistribution {
    /// Element-wise sum
    pub fn add(&mut self, other: &DelayDistribution) {
        self.under_15 += other.under_15;
        self.from_15_to_60 += other.from_15_to_60;
        self.over_60 += other.over_60;
    }

    /// Buckets paired with their labels, in display order
    pub fn buckets(&self) -> [(&'static str, f64); 3] {
        [
            (BUCKET_0_15, self.under_15),
            (BUCKET_15_60, self.from_15_to_60),
            (BUCKET_60_PLUS, self.over_60),
        ]
    }
}

/// Route performance of one airline, from `/route-performance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePerformanceRecord {
    #[serde(default)]
    pub total_flights: u64,
    #[serde(default)]
    pub avg_arrival_delay: f64,
    #[serde(default)]
    pub avg_departure_delay: f64,
    #[serde(default)]
    pub delay_distribution: DelayDistribution,
}

/// Route summary across all carriers that reported data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRouteStats {
    pub total_flights: u64,
    pub avg_arrival_delay: f64,
    pub avg_departure_delay: f64,
    pub delay_distribution: DelayDistribution,
}

impl From<RoutePerformanceRecord> for AggregatedRouteStats {
    fn from(record: RoutePerformanceRecord) -> Self {
        Self {
            total_flights: record.total_flights,
            avg_arrival_delay: record.avg_arrival_delay,
            avg_departure_delay: record.avg_departure_delay,
            delay_distribution: record.delay_distribution,
        }
    }
}

/// One scheduled flight on a route, from `/get_flights_by_route`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub flight_number: serde_json::Value,
    #[serde(deserialize_with = "deserialize_hhmm")]
    pub scheduled_departure: u32,
    #[serde(deserialize_with = "deserialize_hhmm")]
    pub scheduled_arrival: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_arrival_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_departure_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_risk: Option<String>,
}

/// Response of `/get_flights_by_route`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteFlights {
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub total_flights_available: Option<u64>,
    #[serde(default)]
    pub flights: Vec<FlightOption>,
}

/// Number of alternative flights worth showing
pub const MAX_ALTERNATIVES: usize = 5;

impl RouteFlights {
    pub fn alternatives(&self) -> &[FlightOption] {
        let end = self.flights.len().min(MAX_ALTERNATIVES);
        &self.flights[..end]
    }
}

/// Response of `/route-performance-all`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOverview {
    #[serde(default)]
    pub total_airlines: Option<u64>,
    #[serde(default)]
    pub avg_arrival_delay: Option<f64>,
    #[serde(default)]
    pub avg_departure_delay: Option<f64>,
}

/// Airline ranking among all carriers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineRanking {
    pub rank_by_arrival_delay: u32,
    pub rank_by_departure_delay: u32,
    pub total_airlines: u32,
}

/// Response of `/airline-delay-stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineDelayStats {
    #[serde(default)]
    pub total_flights: u64,
    #[serde(default)]
    pub avg_arrival_delay: f64,
    #[serde(default)]
    pub avg_departure_delay: f64,
    /// Cause name to percentage of flights delayed by it
    #[serde(default)]
    pub delays_by_cause: BTreeMap<String, f64>,
    #[serde(default)]
    pub ranking: AirlineRanking,
}

impl AirlineDelayStats {
    /// Share of flights not delayed by any cause, in percent
    pub fn on_time_performance(&self) -> f64 {
        100.0 - self.delays_by_cause.values().sum::<f64>()
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::now(MessageKind::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::now(MessageKind::Bot, text)
    }

    fn now(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Features advertised to the chat assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableFeatures {
    pub delay_prediction: bool,
    pub route_analysis: bool,
    pub alternative_flights: bool,
    pub airline_stats: bool,
}

impl Default for AvailableFeatures {
    fn default() -> Self {
        Self {
            delay_prediction: true,
            route_analysis: true,
            alternative_flights: true,
            airline_stats: true,
        }
    }
}

/// Context attached to every chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub current_portal: String,
    pub conversation_history: Vec<ChatMessage>,
    pub timestamp: String,
    pub available_features: AvailableFeatures,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
}

/// Reply text used when the service answers with neither field set
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I could not process your request.";

/// Bot message recorded when a chat call fails
pub const CHAT_ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your message. Please try again.";

/// Response of `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        self.response
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.message.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(CHAT_FALLBACK_REPLY)
    }
}

/// Format a packed HHMM value as `HH:MM`
pub fn format_hhmm(value: u32) -> String {
    format!("{:02}:{:02}", value / 100, value % 100)
}

/// Accept HHMM sent either as an integer or as a whole float (`900.0`)
fn deserialize_hhmm<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > 2359.0 {
        return Err(serde::de::Error::custom(format!(
            "{value} is not an HHMM time"
        )));
    }
    Ok(value as u32)
}
