//! HTTP client for the flight prediction service

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ServiceError;
use crate::models::{
    AirlineDelayStats, ChatReply, ChatRequest, FlightSearchInput, PredictionResponse,
    PredictionResult, RouteFlights, RouteOverview, RoutePerformanceRecord,
};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations offered by the prediction service
///
/// Implemented over HTTP by [`HttpFlightApi`]; tests substitute their own.
#[async_trait]
pub trait FlightApi: Send + Sync {
    /// `POST /predict`
    async fn predict(&self, input: &FlightSearchInput) -> Result<PredictionResult, ServiceError>;

    /// `GET /route-performance` for a single carrier
    async fn route_performance(
        &self,
        airline: &str,
        origin: &str,
        destination: &str,
    ) -> Result<RoutePerformanceRecord, ServiceError>;

    /// `GET /get_flights_by_route`
    async fn flights_by_route(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<RouteFlights, ServiceError>;

    /// `GET /route-performance-all`
    async fn route_overview(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteOverview, ServiceError>;

    /// `GET /airline-delay-stats`
    async fn airline_delay_stats(&self, airline: &str) -> Result<AirlineDelayStats, ServiceError>;

    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ServiceError>;
}

/// reqwest-backed implementation of [`FlightApi`]
pub struct HttpFlightApi {
    client: Client,
    base_url: Url,
}

impl HttpFlightApi {
    /// Create a new API client with the default timeout
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new API client with an explicit request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(path, &[])?;
        debug!(%url, "POST");

        let response = self.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FlightApi for HttpFlightApi {
    async fn predict(&self, input: &FlightSearchInput) -> Result<PredictionResult, ServiceError> {
        let response: PredictionResponse = self.post("predict", input).await?;
        Ok(response.prediction)
    }

    async fn route_performance(
        &self,
        airline: &str,
        origin: &str,
        destination: &str,
    ) -> Result<RoutePerformanceRecord, ServiceError> {
        self.get(
            "route-performance",
            &[
                ("airline", airline),
                ("origin", origin),
                ("destination", destination),
            ],
        )
        .await
    }

    async fn flights_by_route(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<RouteFlights, ServiceError> {
        self.get(
            "get_flights_by_route",
            &[
                ("origin_airport", origin),
                ("destination_airport", destination),
                ("date", date),
            ],
        )
        .await
    }

    async fn route_overview(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteOverview, ServiceError> {
        self.get(
            "route-performance-all",
            &[("origin", origin), ("destination", destination)],
        )
        .await
    }

    async fn airline_delay_stats(&self, airline: &str) -> Result<AirlineDelayStats, ServiceError> {
        self.get("airline-delay-stats", &[("airline", airline)]).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ServiceError> {
        self.post("chat", request).await
    }
}
