//! In-memory [`FlightApi`] used by unit tests

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::client::FlightApi;
use crate::error::ServiceError;
use crate::models::{
    AirlineDelayStats, ChatReply, ChatRequest, DelayDistribution, FlightOption,
    FlightSearchInput, PredictionResult, RouteFlights, RouteOverview, RoutePerformanceRecord,
};

/// Mock API with per-endpoint failure switches and a call log
pub struct MockApi {
    failing_carriers: HashSet<String>,
    fail_predict: bool,
    fail_flights: bool,
    fail_chat: bool,
    fail_overview: bool,
    calls: Mutex<Vec<String>>,
    predict_count: AtomicUsize,
    last_chat: Mutex<Option<ChatRequest>>,
    last_predict: Mutex<Option<FlightSearchInput>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            failing_carriers: HashSet::new(),
            fail_predict: false,
            fail_flights: false,
            fail_chat: false,
            fail_overview: false,
            calls: Mutex::new(Vec::new()),
            predict_count: AtomicUsize::new(0),
            last_chat: Mutex::new(None),
            last_predict: Mutex::new(None),
        }
    }

    pub fn failing_carrier(mut self, carrier: &str) -> Self {
        self.failing_carriers.insert(carrier.to_string());
        self
    }

    pub fn failing_predict(mut self) -> Self {
        self.fail_predict = true;
        self
    }

    pub fn failing_flights(mut self) -> Self {
        self.fail_flights = true;
        self
    }

    pub fn failing_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    pub fn failing_overview(mut self) -> Self {
        self.fail_overview = true;
        self
    }

    /// Every call in the order it was made, e.g. `predict`, `route:AA`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn predict_count(&self) -> usize {
        self.predict_count.load(Ordering::SeqCst)
    }

    /// Carriers queried via `route_performance`, in call order
    pub fn route_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("route:").map(str::to_string))
            .collect()
    }

    pub fn last_chat(&self) -> Option<ChatRequest> {
        self.last_chat.lock().unwrap().clone()
    }

    pub fn last_predict(&self) -> Option<FlightSearchInput> {
        self.last_predict.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn unavailable() -> ServiceError {
        ServiceError::Status {
            status: 503,
            body: "service unavailable".to_string(),
        }
    }
}

/// Flights per carrier in the mock's route data
pub fn carrier_flights(carrier: &str) -> u64 {
    match carrier {
        "AA" => 100,
        "DL" => 200,
        "UA" => 300,
        "WN" => 600,
        _ => 0,
    }
}

#[async_trait]
impl FlightApi for MockApi {
    async fn predict(&self, input: &FlightSearchInput) -> Result<PredictionResult, ServiceError> {
        self.record("predict");
        *self.last_predict.lock().unwrap() = Some(input.clone());
        self.predict_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_predict {
            return Err(Self::unavailable());
        }

        Ok(PredictionResult {
            delay_probability: 0.42,
            is_delayed: false,
            prediction_text: "ON_TIME".to_string(),
            confidence: 0.87,
        })
    }

    async fn route_performance(
        &self,
        airline: &str,
        _origin: &str,
        _destination: &str,
    ) -> Result<RoutePerformanceRecord, ServiceError> {
        self.record(format!("route:{airline}"));

        if self.failing_carriers.contains(airline) {
            return Err(ServiceError::Transport("connection reset".to_string()));
        }

        let flights = carrier_flights(airline);
        Ok(RoutePerformanceRecord {
            total_flights: flights,
            avg_arrival_delay: flights as f64 / 20.0,
            avg_departure_delay: flights as f64 / 40.0,
            delay_distribution: DelayDistribution {
                under_15: flights as f64 * 0.7,
                from_15_to_60: flights as f64 * 0.2,
                over_60: flights as f64 * 0.1,
            },
        })
    }

    async fn flights_by_route(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<RouteFlights, ServiceError> {
        self.record(format!("flights:{origin}-{destination}@{date}"));

        if self.fail_flights {
            return Err(Self::unavailable());
        }

        Ok(RouteFlights {
            route: Some(format!("{origin} -> {destination}")),
            total_flights_available: Some(1),
            flights: vec![FlightOption {
                airline: "AA".to_string(),
                flight_number: serde_json::json!(1),
                scheduled_departure: 700,
                scheduled_arrival: 1005,
                avg_arrival_delay: Some(4.0),
                avg_departure_delay: Some(6.0),
                delay_risk: Some("Low".to_string()),
            }],
        })
    }

    async fn route_overview(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteOverview, ServiceError> {
        self.record(format!("overview:{origin}-{destination}"));

        if self.fail_overview {
            return Err(ServiceError::Transport("connection reset".to_string()));
        }

        Ok(RouteOverview {
            total_airlines: Some(4),
            avg_arrival_delay: Some(8.0),
            avg_departure_delay: Some(9.5),
        })
    }

    async fn airline_delay_stats(&self, airline: &str) -> Result<AirlineDelayStats, ServiceError> {
        self.record(format!("airline:{airline}"));
        Ok(AirlineDelayStats {
            total_flights: carrier_flights(airline),
            ..AirlineDelayStats::default()
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ServiceError> {
        self.record("chat");
        *self.last_chat.lock().unwrap() = Some(request.clone());

        if self.fail_chat {
            return Err(Self::unavailable());
        }

        Ok(ChatReply {
            response: Some(format!("echo: {}", request.message)),
            message: None,
        })
    }
}
