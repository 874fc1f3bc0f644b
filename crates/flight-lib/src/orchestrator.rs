//! Prediction flow
//!
//! Validates a search, sends exactly one prediction request and, only once
//! that request has succeeded, fetches the flights on the same route and
//! date. When those load, the service-wide route overview is fetched too;
//! it is best effort and its absence only blanks the overview figures.

use serde::{Deserialize, Serialize};

use crate::client::FlightApi;
use crate::error::{Result, ServiceError};
use crate::models::{FlightSearchInput, PredictionResult, RiskLevel, RouteFlights, RouteOverview};
use crate::observability::StructuredLogger;
use crate::search::{normalized, validate, SearchForm};

/// Everything produced by a successful prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub input: FlightSearchInput,
    pub prediction: PredictionResult,
    pub risk: RiskLevel,
    /// Flights on the same route and date, if they could be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_flights: Option<RouteFlights>,
    /// Why the route flights are missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_flights_warning: Option<String>,
    /// Airline count and average delays across the route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_overview: Option<RouteOverview>,
}

/// Validate and send a single prediction request
///
/// Codes are trimmed and upper-cased first. No request is made when
/// validation fails.
pub async fn predict<A: FlightApi + ?Sized>(
    api: &A,
    logger: &StructuredLogger,
    input: &FlightSearchInput,
) -> Result<PredictionResult> {
    let input = normalized(input);
    validate(&input)?;

    logger.log_prediction_request(&input);
    let prediction = api.predict(&input).await.map_err(|err| {
        logger.log_prediction_failure(&input, &err);
        err
    })?;
    logger.log_prediction(&input, &prediction);

    Ok(prediction)
}

/// Full prediction flow: prediction first, then the dependent route fetch
pub async fn run_prediction<A: FlightApi + ?Sized>(
    api: &A,
    logger: &StructuredLogger,
    form: SearchForm,
) -> Result<PredictionOutcome> {
    let input = form.into_input()?;
    let prediction = predict(api, logger, &input).await?;
    let risk = RiskLevel::from_prediction(&prediction);

    let (route_flights, route_flights_warning) = match load_route_flights(api, &input).await {
        Ok(flights) => (Some(flights), None),
        Err(err) => {
            logger.log_route_flights_failure(&input.origin_airport, &input.destination_airport, &err);
            (None, Some(format!("Could not load route statistics: {err}")))
        }
    };

    let route_overview = if route_flights.is_some() {
        load_route_overview(api, logger, &input).await
    } else {
        None
    };

    Ok(PredictionOutcome {
        input,
        prediction,
        risk,
        route_flights,
        route_flights_warning,
        route_overview,
    })
}

async fn load_route_flights<A: FlightApi + ?Sized>(
    api: &A,
    input: &FlightSearchInput,
) -> std::result::Result<RouteFlights, ServiceError> {
    api.flights_by_route(
        &input.origin_airport,
        &input.destination_airport,
        &input.date_string(),
    )
    .await
}

async fn load_route_overview<A: FlightApi + ?Sized>(
    api: &A,
    logger: &StructuredLogger,
    input: &FlightSearchInput,
) -> Option<RouteOverview> {
    api.route_overview(&input.origin_airport, &input.destination_airport)
        .await
        .map_err(|err| {
            logger.log_route_overview_failure(&input.origin_airport, &input.destination_airport, &err)
        })
        .ok()
}
