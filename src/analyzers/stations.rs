use crate::analyzers::measured;
use crate::analyzers::types::PopularStations;
use crate::analyzers::utility::mode;
use crate::city::Column;
use crate::table::TripTable;

/// Most common start station, end station and start-to-end trip.
///
/// The trip is counted on the combined `"<start> to <end>"` string, so only
/// rows that have both stations take part.
pub fn popular_stations(table: &TripTable) -> PopularStations {
    let rows = table.rows();
    let has_start = table.has_column(Column::StartStation);
    let has_end = table.has_column(Column::EndStation);

    let start_station = has_start
        .then(|| {
            measured("most_common_start_station", || {
                mode(rows.iter().filter_map(|r| r.start_station.as_deref()))
            })
        })
        .flatten();

    let end_station = has_end
        .then(|| {
            measured("most_common_end_station", || {
                mode(rows.iter().filter_map(|r| r.end_station.as_deref()))
            })
        })
        .flatten();

    let trip = (has_start && has_end)
        .then(|| {
            measured("most_common_trip", || {
                mode(rows.iter().filter_map(|r| {
                    match (r.start_station.as_deref(), r.end_station.as_deref()) {
                        (Some(start), Some(end)) => Some(format!("{start} to {end}")),
                        _ => None,
                    }
                }))
            })
        })
        .flatten();

    PopularStations {
        start_station: start_station.map(str::to_string),
        end_station: end_station.map(str::to_string),
        trip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{City, Schema};
    use crate::table::TripRecord;
    use chrono::NaiveDate;

    fn trip(start: &str, end: &str) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TripRecord::new(ts).with_stations(start, end)
    }

    fn stations() -> Schema {
        Schema::from_columns([Column::StartStation, Column::EndStation])
    }

    #[test]
    fn test_pair_counted_as_combined_value() {
        let table = TripTable::new(
            City::NewYork,
            stations(),
            vec![trip("A", "B"), trip("A", "C"), trip("A", "B"), trip("A", "B")],
        );
        let result = popular_stations(&table);
        assert_eq!(result.start_station.as_deref(), Some("A"));
        assert_eq!(result.end_station.as_deref(), Some("B"));
        assert_eq!(result.trip.as_deref(), Some("A to B"));
    }

    #[test]
    fn test_pair_differs_from_independent_modes() {
        // start mode is X and end mode is Z, but X->Z never happens
        let table = TripTable::new(
            City::Chicago,
            stations(),
            vec![
                trip("X", "Y"),
                trip("X", "Y"),
                trip("X", "W"),
                trip("V", "Z"),
                trip("U", "Z"),
                trip("T", "Z"),
            ],
        );
        let result = popular_stations(&table);
        assert_eq!(result.start_station.as_deref(), Some("X"));
        assert_eq!(result.end_station.as_deref(), Some("Z"));
        assert_eq!(result.trip.as_deref(), Some("X to Y"));
    }

    #[test]
    fn test_missing_end_column_skips_end_and_trip() {
        let ts = NaiveDate::from_ymd_opt(2017, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut record = TripRecord::new(ts);
        record.start_station = Some("A".to_string());
        let table = TripTable::new(
            City::Washington,
            Schema::from_columns([Column::StartStation]),
            vec![record],
        );
        let result = popular_stations(&table);
        assert_eq!(result.start_station.as_deref(), Some("A"));
        assert_eq!(result.end_station, None);
        assert_eq!(result.trip, None);
    }

    #[test]
    fn test_empty_table() {
        let table = TripTable::new(City::Chicago, stations(), vec![]);
        assert_eq!(popular_stations(&table), PopularStations::default());
    }
}
