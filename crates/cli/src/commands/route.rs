//! Route statistics command

use anyhow::Result;
use colored::Colorize;
use flight_lib::{RouteOverview, RouteReport, Session};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{
    format_bucket, format_count, format_minutes, format_optional_minutes, print_json,
    print_success, print_warning, OutputFormat,
};

/// Row for delay distribution table
#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Delay")]
    bucket: &'static str,
    #[tabled(rename = "Flights")]
    flights: String,
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    #[serde(flatten)]
    report: &'a RouteReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<&'a RouteOverview>,
}

/// Summarize a route across carriers
pub async fn show_route(
    session: &Session,
    origin: Option<String>,
    destination: Option<String>,
    with_overview: bool,
    format: OutputFormat,
) -> Result<()> {
    let report = session.route_report(origin, destination).await?;

    // The overview is supplementary; a failure only blanks its fields
    let overview = if with_overview {
        match session
            .route_overview(Some(report.origin.clone()), Some(report.destination.clone()))
            .await
        {
            Ok(overview) => Some(overview),
            Err(err) => {
                tracing::warn!(error = %err, "Route overview unavailable");
                Some(RouteOverview::default())
            }
        }
    } else {
        None
    };

    match format {
        OutputFormat::Json => print_json(&RouteOutput {
            report: &report,
            overview: overview.as_ref(),
        })?,
        OutputFormat::Table => print_report(&report, overview.as_ref()),
    }

    Ok(())
}

fn print_report(report: &RouteReport, overview: Option<&RouteOverview>) {
    let Some(stats) = &report.stats else {
        print_warning(&format!(
            "No flight data found for route {} to {}",
            report.origin, report.destination
        ));
        return;
    };

    println!("{}", "Route Performance".bold());
    println!("{}", "=".repeat(50));
    println!(
        "Route:                  {} → {} ({} airlines)",
        report.origin.cyan(),
        report.destination.cyan(),
        report.carriers.len()
    );
    println!("Carriers:               {}", report.carriers.join(", "));
    println!("Total flights:          {}", format_count(stats.total_flights));
    println!(
        "Avg arrival delay:      {}",
        format_minutes(stats.avg_arrival_delay)
    );
    println!(
        "Avg departure delay:    {}",
        format_minutes(stats.avg_departure_delay)
    );
    println!();

    let rows: Vec<BucketRow> = stats
        .delay_distribution
        .buckets()
        .into_iter()
        .map(|(bucket, value)| BucketRow {
            bucket,
            flights: format_bucket(value),
        })
        .collect();
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);

    if let Some(overview) = overview {
        println!();
        println!("{}", "All Airlines".bold());
        println!("{}", "-".repeat(50));
        println!(
            "Airlines:               {}",
            overview
                .total_airlines
                .map(format_count)
                .unwrap_or_else(|| "--".to_string())
        );
        println!(
            "Avg arrival delay:      {}",
            format_optional_minutes(overview.avg_arrival_delay)
        );
        println!(
            "Avg departure delay:    {}",
            format_optional_minutes(overview.avg_departure_delay)
        );
    }

    println!();
    print_success(&format!(
        "Route analysis complete for {} → {} ({} airlines)",
        report.origin,
        report.destination,
        report.carriers.len()
    ));
}
