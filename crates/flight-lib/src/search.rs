//! Flight search input validation and normalization
//!
//! Turns the loosely typed search form into a [`FlightSearchInput`]. All
//! checks here run before any request is made.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;
use crate::models::FlightSearchInput;

/// Raw search form as entered by the user
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    pub airline: Option<String>,
    /// Minutes
    pub scheduled_time: Option<u32>,
    pub distance: Option<u32>,
}

impl SearchForm {
    /// Validate and normalize into a request-ready input
    pub fn into_input(self) -> Result<FlightSearchInput, ValidationError> {
        let origin = required_code(self.origin, "origin")?;
        let destination = required_code(self.destination, "destination")?;
        let date = required_text(self.date, "date")?;
        let time = required_text(self.time, "time")?;
        let airline = required_code(self.airline, "airline")?;
        let scheduled_time = required_positive(self.scheduled_time, "scheduled_time")?;
        let distance = required_positive(self.distance, "distance")?;

        ensure_distinct(&origin, &destination)?;

        let date = parse_date(&date)?;
        let (hours, minutes) = parse_time(&time)?;

        Ok(FlightSearchInput {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            airline,
            origin_airport: origin,
            destination_airport: destination,
            scheduled_departure: encode_departure(hours, minutes),
            scheduled_time,
            distance,
        })
    }
}

/// Pack a departure time as `hours * 100 + minutes` (13:45 becomes 1345)
pub fn encode_departure(hours: u32, minutes: u32) -> u32 {
    hours * 100 + minutes
}

/// Copy of `input` with trimmed, upper-cased airport and airline codes
pub fn normalized(input: &FlightSearchInput) -> FlightSearchInput {
    FlightSearchInput {
        airline: input.airline.trim().to_ascii_uppercase(),
        origin_airport: input.origin_airport.trim().to_ascii_uppercase(),
        destination_airport: input.destination_airport.trim().to_ascii_uppercase(),
        ..input.clone()
    }
}

/// Re-check an already built input, e.g. one deserialized from elsewhere
pub fn validate(input: &FlightSearchInput) -> Result<(), ValidationError> {
    if input.year == 0 {
        return Err(ValidationError::MissingField("year"));
    }
    if input.month == 0 {
        return Err(ValidationError::MissingField("month"));
    }
    if input.day == 0 {
        return Err(ValidationError::MissingField("day"));
    }
    if input.airline.trim().is_empty() {
        return Err(ValidationError::MissingField("airline"));
    }
    if input.origin_airport.trim().is_empty() {
        return Err(ValidationError::MissingField("origin"));
    }
    if input.destination_airport.trim().is_empty() {
        return Err(ValidationError::MissingField("destination"));
    }
    if input.scheduled_time == 0 {
        return Err(ValidationError::MissingField("scheduled_time"));
    }
    if input.distance == 0 {
        return Err(ValidationError::MissingField("distance"));
    }

    let hours = input.scheduled_departure / 100;
    let minutes = input.scheduled_departure % 100;
    if hours > 23 || minutes > 59 {
        return Err(ValidationError::InvalidField {
            field: "scheduled_departure",
            reason: format!("{} is not a valid HHMM time", input.scheduled_departure),
        });
    }

    ensure_distinct(&input.origin_airport, &input.destination_airport)
}

/// Origin and destination must name different airports
pub fn ensure_distinct(origin: &str, destination: &str) -> Result<(), ValidationError> {
    let origin = origin.trim();
    if origin.eq_ignore_ascii_case(destination.trim()) {
        return Err(ValidationError::SameOriginDestination(
            origin.to_ascii_uppercase(),
        ));
    }
    Ok(())
}

/// Trim and upper-case an IATA code, rejecting blanks
pub fn normalize_code(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    required_code(value, field)
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn required_code(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    required_text(value, field).map(|v| v.to_ascii_uppercase())
}

fn required_positive(value: Option<u32>, field: &'static str) -> Result<u32, ValidationError> {
    value
        .filter(|v| *v > 0)
        .ok_or(ValidationError::MissingField(field))
}

fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ValidationError::InvalidField {
        field: "date",
        reason: format!("{value:?}: {e}"),
    })
}

fn parse_time(value: &str) -> Result<(u32, u32), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidField {
        field: "time",
        reason: format!("{value:?}: {reason}"),
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(|| invalid("expected HH:MM"))?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid("hours are not a number"))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| invalid("minutes are not a number"))?;

    if hours > 23 {
        return Err(invalid("hours must be 0-23"));
    }
    if minutes > 59 {
        return Err(invalid("minutes must be 0-59"));
    }

    Ok((hours, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> SearchForm {
        SearchForm {
            origin: Some("jfk".to_string()),
            destination: Some(" LAX ".to_string()),
            date: Some("2024-03-15".to_string()),
            time: Some("13:45".to_string()),
            airline: Some("aa".to_string()),
            scheduled_time: Some(360),
            distance: Some(2475),
        }
    }

    #[test]
    fn test_encode_departure() {
        assert_eq!(encode_departure(13, 45), 1345);
        assert_eq!(encode_departure(0, 5), 5);
        assert_eq!(encode_departure(23, 59), 2359);
    }

    #[test]
    fn test_complete_form_normalizes() {
        let input = complete_form().into_input().unwrap();

        assert_eq!(input.year, 2024);
        assert_eq!(input.month, 3);
        assert_eq!(input.day, 15);
        assert_eq!(input.airline, "AA");
        assert_eq!(input.origin_airport, "JFK");
        assert_eq!(input.destination_airport, "LAX");
        assert_eq!(input.scheduled_departure, 1345);
        assert_eq!(input.scheduled_time, 360);
        assert_eq!(input.distance, 2475);
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_departure_is_not_minutes_since_midnight() {
        let mut form = complete_form();
        form.time = Some("01:30".to_string());
        let input = form.into_input().unwrap();
        assert_eq!(input.scheduled_departure, 130);
        assert_ne!(input.scheduled_departure, 90);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let cases: [(fn(&mut SearchForm), &str); 7] = [
            (|f: &mut SearchForm| f.origin = None, "origin"),
            (|f: &mut SearchForm| f.destination = Some("  ".to_string()), "destination"),
            (|f: &mut SearchForm| f.date = None, "date"),
            (|f: &mut SearchForm| f.time = None, "time"),
            (|f: &mut SearchForm| f.airline = Some(String::new()), "airline"),
            (|f: &mut SearchForm| f.scheduled_time = Some(0), "scheduled_time"),
            (|f: &mut SearchForm| f.distance = None, "distance"),
        ];

        for (mutate, field) in cases {
            let mut form = complete_form();
            mutate(&mut form);
            assert_eq!(
                form.into_input().unwrap_err(),
                ValidationError::MissingField(field)
            );
        }
    }

    #[test]
    fn test_same_origin_and_destination_rejected() {
        let mut form = complete_form();
        form.origin = Some("JFK".to_string());
        form.destination = Some("jfk".to_string());

        assert_eq!(
            form.into_input().unwrap_err(),
            ValidationError::SameOriginDestination("JFK".to_string())
        );
    }

    #[test]
    fn test_bad_time_rejected() {
        for time in ["24:00", "12:60", "1345", "ab:cd"] {
            let mut form = complete_form();
            form.time = Some(time.to_string());
            assert!(matches!(
                form.into_input(),
                Err(ValidationError::InvalidField { field: "time", .. })
            ));
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut form = complete_form();
        form.date = Some("2024-02-30".to_string());
        assert!(matches!(
            form.into_input(),
            Err(ValidationError::InvalidField { field: "date", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_and_bad_hhmm() {
        let input = complete_form().into_input().unwrap();

        let mut zero = input.clone();
        zero.distance = 0;
        assert_eq!(validate(&zero), Err(ValidationError::MissingField("distance")));

        let mut bad_time = input.clone();
        bad_time.scheduled_departure = 1275;
        assert!(validate(&bad_time).is_err());

        let mut same = input;
        same.destination_airport = same.origin_airport.clone();
        assert!(matches!(
            validate(&same),
            Err(ValidationError::SameOriginDestination(_))
        ));
    }

    #[test]
    fn test_padded_codes_normalized_before_check() {
        let mut input = complete_form().into_input().unwrap();
        input.origin_airport = " jfk ".to_string();
        input.destination_airport = "JFK".to_string();

        assert!(matches!(
            validate(&input),
            Err(ValidationError::SameOriginDestination(code)) if code == "JFK"
        ));

        input.destination_airport = "lax".to_string();
        input.airline = " dl".to_string();
        let clean = normalized(&input);
        assert_eq!(clean.origin_airport, "JFK");
        assert_eq!(clean.destination_airport, "LAX");
        assert_eq!(clean.airline, "DL");
        assert_eq!(clean.scheduled_departure, input.scheduled_departure);
    }
}
