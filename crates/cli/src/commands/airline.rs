//! Airline delay statistics command

use anyhow::Result;
use colored::Colorize;
use flight_lib::catalog::airline_name;
use flight_lib::Session;
use tabled::Tabled;

use crate::output::{format_count, print_json, OutputFormat};

/// Row for delay causes table
#[derive(Tabled)]
struct CauseRow {
    #[tabled(rename = "Cause")]
    cause: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Show delay statistics and ranking for an airline
pub async fn show_airline(session: &Session, airline: String, format: OutputFormat) -> Result<()> {
    let code = airline.trim().to_ascii_uppercase();
    let stats = session.airline_stats(Some(airline)).await?;

    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Table => {
            println!("{}", "Airline Performance".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Airline:                {} ({})",
                code.cyan(),
                airline_name(&code).unwrap_or("unknown airline")
            );
            println!(
                "On-time performance:    {}",
                format!("{:.1}%", stats.on_time_performance()).bold()
            );
            println!("Avg arrival delay:      {:.1} min", stats.avg_arrival_delay);
            println!("Avg departure delay:    {:.1} min", stats.avg_departure_delay);
            println!("Monthly flights:        {}", format_count(stats.total_flights));
            println!();

            println!("{}", "Ranking".bold());
            println!("{}", "-".repeat(50));
            println!(
                "By arrival delay:       {} / {}",
                stats.ranking.rank_by_arrival_delay, stats.ranking.total_airlines
            );
            println!(
                "By departure delay:     {} / {}",
                stats.ranking.rank_by_departure_delay, stats.ranking.total_airlines
            );

            if !stats.delays_by_cause.is_empty() {
                println!();
                let rows: Vec<CauseRow> = stats
                    .delays_by_cause
                    .iter()
                    .map(|(cause, share)| CauseRow {
                        cause: cause.clone(),
                        share: format!("{:.1}%", share),
                    })
                    .collect();
                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
            }
        }
    }

    Ok(())
}
