//! Airport and airline listings

use anyhow::Result;
use flight_lib::catalog::{CatalogEntry, AIRLINES, AIRPORTS};
use tabled::Tabled;

use crate::output::{print_json, OutputFormat};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
}

/// List known airports
pub fn list_airports(format: OutputFormat) -> Result<()> {
    print_entries(AIRPORTS, format)
}

/// List known airlines
pub fn list_airlines(format: OutputFormat) -> Result<()> {
    print_entries(AIRLINES, format)
}

fn print_entries(entries: &[CatalogEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(entries)?,
        OutputFormat::Table => {
            let rows = entries.iter().map(|e| EntryRow {
                code: e.code,
                name: e.name,
            });
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }
    Ok(())
}
