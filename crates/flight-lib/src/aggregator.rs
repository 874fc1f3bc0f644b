//! Route statistics aggregation
//!
//! Reduces per-carrier route performance into a single route summary using
//! flight-count weighted averages.

use crate::models::{AggregatedRouteStats, RoutePerformanceRecord};

/// Combine per-carrier records into one route summary
///
/// Returns `None` for an empty slice, which callers treat as "no data for
/// this route". A single record is passed through unchanged.
pub fn aggregate(records: &[RoutePerformanceRecord]) -> Option<AggregatedRouteStats> {
    match records {
        [] => None,
        [only] => Some(only.clone().into()),
        _ => Some(weighted_merge(records)),
    }
}

fn weighted_merge(records: &[RoutePerformanceRecord]) -> AggregatedRouteStats {
    let mut aggregated = AggregatedRouteStats::default();
    let mut weighted_arrival = 0.0;
    let mut weighted_departure = 0.0;

    for record in records {
        let flights = record.total_flights as f64;
        aggregated.total_flights += record.total_flights;
        weighted_arrival += record.avg_arrival_delay * flights;
        weighted_departure += record.avg_departure_delay * flights;
        aggregated
            .delay_distribution
            .add(&record.delay_distribution);
    }

    if aggregated.total_flights > 0 {
        let weight = aggregated.total_flights as f64;
        aggregated.avg_arrival_delay = weighted_arrival / weight;
        aggregated.avg_departure_delay = weighted_departure / weight;
    }

    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DelayDistribution;

    fn record(flights: u64, arrival: f64, departure: f64, dist: [f64; 3]) -> RoutePerformanceRecord {
        RoutePerformanceRecord {
            total_flights: flights,
            avg_arrival_delay: arrival,
            avg_departure_delay: departure,
            delay_distribution: DelayDistribution {
                under_15: dist[0],
                from_15_to_60: dist[1],
                over_60: dist[2],
            },
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_no_data() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn test_single_record_passes_through() {
        let only = record(7, 3.333_333_3, 1.1, [5.0, 1.0, 1.0]);
        let stats = aggregate(std::slice::from_ref(&only)).unwrap();

        assert_eq!(stats.total_flights, only.total_flights);
        assert_eq!(stats.avg_arrival_delay, only.avg_arrival_delay);
        assert_eq!(stats.avg_departure_delay, only.avg_departure_delay);
        assert_eq!(stats.delay_distribution, only.delay_distribution);
    }

    #[test]
    fn test_single_zero_flight_record_passes_through() {
        let only = record(0, 12.0, 4.0, [0.0, 0.0, 0.0]);
        let stats = aggregate(&[only]).unwrap();
        assert_eq!(stats.avg_arrival_delay, 12.0);
    }

    #[test]
    fn test_weighted_average_of_two_carriers() {
        let records = [
            record(100, 10.0, 5.0, [60.0, 30.0, 10.0]),
            record(300, 20.0, 15.0, [200.0, 80.0, 20.0]),
        ];

        let stats = aggregate(&records).unwrap();

        assert_eq!(stats.total_flights, 400);
        assert!(approx(stats.avg_arrival_delay, 17.5));
        assert!(approx(stats.avg_departure_delay, 12.5));
        assert_eq!(
            stats.delay_distribution,
            DelayDistribution {
                under_15: 260.0,
                from_15_to_60: 110.0,
                over_60: 30.0,
            }
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = record(100, 10.0, 5.0, [60.0, 30.0, 10.0]);
        let b = record(300, 20.0, 15.0, [200.0, 80.0, 20.0]);
        let c = record(42, 3.5, 0.25, [40.0, 2.0, 0.0]);

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let reversed = aggregate(&[c.clone(), b.clone(), a.clone()]).unwrap();
        let shuffled = aggregate(&[b, a, c]).unwrap();

        for other in [&reversed, &shuffled] {
            assert_eq!(forward.total_flights, other.total_flights);
            assert!(approx(forward.avg_arrival_delay, other.avg_arrival_delay));
            assert!(approx(forward.avg_departure_delay, other.avg_departure_delay));
            assert_eq!(forward.delay_distribution, other.delay_distribution);
        }
    }

    #[test]
    fn test_zero_weights_leave_averages_at_zero() {
        let records = [
            record(0, 10.0, 5.0, [1.0, 0.0, 0.0]),
            record(0, 20.0, 15.0, [0.0, 2.0, 0.0]),
        ];

        let stats = aggregate(&records).unwrap();

        assert_eq!(stats.total_flights, 0);
        assert_eq!(stats.avg_arrival_delay, 0.0);
        assert_eq!(stats.avg_departure_delay, 0.0);
        assert!(!stats.avg_arrival_delay.is_nan());
        assert_eq!(stats.delay_distribution.under_15, 1.0);
        assert_eq!(stats.delay_distribution.from_15_to_60, 2.0);
    }

    #[test]
    fn test_missing_buckets_contribute_zero() {
        let sparse: RoutePerformanceRecord = serde_json::from_str(
            r#"{"total_flights": 10, "avg_arrival_delay": 2.0, "avg_departure_delay": 1.0,
                "delay_distribution": {"0-15min": 9}}"#,
        )
        .unwrap();
        let full = record(10, 4.0, 3.0, [5.0, 4.0, 1.0]);

        let stats = aggregate(&[sparse, full]).unwrap();

        assert_eq!(stats.delay_distribution.under_15, 14.0);
        assert_eq!(stats.delay_distribution.from_15_to_60, 4.0);
        assert_eq!(stats.delay_distribution.over_60, 1.0);
        assert!(approx(stats.avg_arrival_delay, 3.0));
    }
}
