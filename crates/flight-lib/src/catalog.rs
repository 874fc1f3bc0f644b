//! Well-known airports and airlines

use serde::Serialize;

/// An IATA code and its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
}

const fn entry(code: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { code, name }
}

pub const AIRPORTS: &[CatalogEntry] = &[
    entry("JFK", "John F. Kennedy International"),
    entry("LAX", "Los Angeles International"),
    entry("LHR", "Heathrow"),
    entry("SFO", "San Francisco International"),
    entry("ORD", "O'Hare International"),
    entry("ATL", "Hartsfield-Jackson Atlanta"),
    entry("DFW", "Dallas/Fort Worth International"),
    entry("DEN", "Denver International"),
    entry("LAS", "McCarran International"),
    entry("SEA", "Seattle-Tacoma International"),
    entry("BOS", "Logan International"),
    entry("MIA", "Miami International"),
    entry("PHX", "Phoenix Sky Harbor"),
    entry("CLT", "Charlotte Douglas"),
    entry("MSP", "Minneapolis-St. Paul"),
];

pub const AIRLINES: &[CatalogEntry] = &[
    entry("AA", "American Airlines"),
    entry("DL", "Delta Air Lines"),
    entry("UA", "United Airlines"),
    entry("WN", "Southwest Airlines"),
    entry("AS", "Alaska Airlines"),
    entry("B6", "JetBlue Airways"),
    entry("NK", "Spirit Airlines"),
    entry("F9", "Frontier Airlines"),
    entry("G4", "Allegiant Air"),
    entry("HA", "Hawaiian Airlines"),
    entry("VX", "Virgin America"),
    entry("US", "US Airways"),
    entry("OO", "SkyWest Airlines"),
    entry("MQ", "American Eagle"),
    entry("EV", "ExpressJet"),
];

fn lookup(entries: &[CatalogEntry], code: &str) -> Option<&'static str> {
    entries
        .iter()
        .find(|e| e.code.eq_ignore_ascii_case(code))
        .map(|e| e.name)
}

pub fn airport_name(code: &str) -> Option<&'static str> {
    lookup(AIRPORTS, code)
}

pub fn airline_name(code: &str) -> Option<&'static str> {
    lookup(AIRLINES, code)
}
