//! Delay prediction command

use anyhow::Result;
use colored::Colorize;
use flight_lib::catalog::{airline_name, airport_name};
use flight_lib::{format_hhmm, FlightOption, PredictionOutcome, SearchForm, Session};
use tabled::Tabled;

use crate::output::{
    color_confidence, color_risk, color_risk_text, format_count, format_percent, print_info,
    print_json, print_warning, OutputFormat,
};

/// Shown when a route overview figure is unavailable
const PLACEHOLDER: &str = "--";

/// Row for alternative flights table
#[derive(Tabled)]
struct AlternativeRow {
    #[tabled(rename = "Flight")]
    flight: String,
    #[tabled(rename = "Departs")]
    departs: String,
    #[tabled(rename = "Arrives")]
    arrives: String,
    #[tabled(rename = "Avg Arr Delay")]
    arrival_delay: String,
    #[tabled(rename = "Avg Dep Delay")]
    departure_delay: String,
    #[tabled(rename = "Risk")]
    risk: String,
}

/// Predict the delay of a flight and show alternatives on the route
pub async fn predict(session: &Session, form: SearchForm, format: OutputFormat) -> Result<()> {
    let outcome = session.predict(form).await?;

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Table => print_outcome(&outcome),
    }

    Ok(())
}

fn print_outcome(outcome: &PredictionOutcome) {
    let input = &outcome.input;
    let prediction = &outcome.prediction;

    println!("{}", "Delay Prediction".bold());
    println!("{}", "=".repeat(50));
    println!(
        "Flight:                 {} ({})",
        input.airline.cyan(),
        airline_name(&input.airline).unwrap_or("unknown airline")
    );
    println!(
        "Route:                  {} → {}",
        describe_airport(&input.origin_airport),
        describe_airport(&input.destination_airport)
    );
    println!(
        "Departure:              {} {}",
        input.date_string(),
        format_hhmm(input.scheduled_departure)
    );
    println!(
        "Block time / distance:  {} min / {}",
        input.scheduled_time,
        format_count(input.distance as u64)
    );
    println!();

    println!(
        "Delay probability:      {}",
        format_percent(prediction.delay_probability).bold()
    );
    println!("Prediction:             {}", prediction.prediction_text);
    println!(
        "Confidence:             {}",
        color_confidence(prediction.confidence)
    );
    println!("Status:                 {}", color_risk(outcome.risk));
    println!();

    if let Some(warning) = &outcome.route_flights_warning {
        print_warning(warning);
        return;
    }

    let Some(flights) = &outcome.route_flights else {
        return;
    };

    println!("{}", "Route Statistics".bold());
    println!("{}", "-".repeat(50));
    println!(
        "Route:                  {}",
        flights.route.as_deref().unwrap_or("N/A")
    );
    println!(
        "Flights available:      {}",
        flights.total_flights_available.unwrap_or(0)
    );
    let overview = outcome.route_overview.as_ref();
    println!(
        "Airlines on route:      {}",
        overview
            .and_then(|o| o.total_airlines)
            .map(format_count)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    );
    println!(
        "Avg arrival delay:      {}",
        format_overview_delay(overview.and_then(|o| o.avg_arrival_delay))
    );
    println!(
        "Avg departure delay:    {}",
        format_overview_delay(overview.and_then(|o| o.avg_departure_delay))
    );
    println!();

    let alternatives = flights.alternatives();
    if alternatives.is_empty() {
        print_info("No alternative flights available for this route.");
        return;
    }

    println!("{}", "Alternative Flights".bold());
    let rows: Vec<AlternativeRow> = alternatives.iter().map(alternative_row).collect();
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);
}

fn alternative_row(flight: &FlightOption) -> AlternativeRow {
    let number = match &flight.flight_number {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    let risk = flight.delay_risk.as_deref().unwrap_or("Low");

    AlternativeRow {
        flight: format!("{} {}", flight.airline, number).trim().to_string(),
        departs: format_hhmm(flight.scheduled_departure),
        arrives: format_hhmm(flight.scheduled_arrival),
        arrival_delay: format_delay(flight.avg_arrival_delay),
        departure_delay: format_delay(flight.avg_departure_delay),
        risk: color_risk_text(&format!("{} Risk", risk)),
    }
}

fn format_overview_delay(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2} min", v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn format_delay(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1} min", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn describe_airport(code: &str) -> String {
    match airport_name(code) {
        Some(name) => format!("{} ({})", code.cyan(), name),
        None => code.cyan().to_string(),
    }
}
