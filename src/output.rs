//! Output formatting for reports and raw rows.
//!
//! Supports a plain-text layout for the terminal and pretty JSON.

use anyhow::Result;
use std::fmt::Write;
use std::time::Duration;

use crate::analyzers::types::FrequencyTable;
use crate::city::Column;
use crate::report::CityReport;
use crate::table::{TripRecord, TripTable};

const RULE: &str = "----------------------------------------";
const NO_DATA: &str = "no data";

fn or_no_data<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}

fn took(out: &mut String, elapsed: Duration) {
    let _ = writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64());
    let _ = writeln!(out, "{RULE}");
}

fn counts(out: &mut String, table: &FrequencyTable) {
    if table.is_empty() {
        let _ = writeln!(out, "  {NO_DATA}");
    }
    for entry in table {
        let _ = writeln!(out, "  {:<20} {}", entry.value, entry.count);
    }
}

/// Renders the four report sections as terminal text.
pub fn render_report(report: &CityReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} trips for {}", report.trips, report.city);
    if report.skipped_rows > 0 {
        let _ = writeln!(
            out,
            "({} rows skipped: unreadable start time)",
            report.skipped_rows
        );
    }
    let _ = writeln!(out, "{RULE}");

    let t = &report.times;
    let _ = writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n");
    let _ = writeln!(out, "Most common month: {}", or_no_data(t.month));
    let _ = writeln!(out, "Most common day of week: {}", or_no_data(t.day));
    let _ = writeln!(out, "Most common hour of day: {}", or_no_data(t.hour));
    took(&mut out, report.timings.times);

    let s = &report.stations;
    let _ = writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n");
    let _ = writeln!(
        out,
        "Most common start station: {}",
        or_no_data(s.start_station.as_deref())
    );
    let _ = writeln!(
        out,
        "Most common end station: {}",
        or_no_data(s.end_station.as_deref())
    );
    let _ = writeln!(
        out,
        "Most common trip from start to end: {}",
        or_no_data(s.trip.as_deref())
    );
    took(&mut out, report.timings.stations);

    let d = &report.duration;
    let _ = writeln!(out, "\nCalculating Trip Duration...\n");
    let _ = writeln!(
        out,
        "Total travel time: {}",
        or_no_data(d.total.map(|v| format!("{v:.1} seconds")))
    );
    let _ = writeln!(
        out,
        "Average travel time: {}",
        or_no_data(d.average.map(|v| format!("{v:.1} seconds")))
    );
    took(&mut out, report.timings.duration);

    let u = &report.users;
    let _ = writeln!(out, "\nCalculating User Stats...\n");
    if let Some(types) = &u.user_types {
        let _ = writeln!(out, "Counts of each user type:");
        counts(&mut out, types);
    }
    if let Some(genders) = &u.genders {
        let _ = writeln!(out, "\nCounts of each gender:");
        counts(&mut out, genders);
    }
    if let Some(years) = &u.birth_years {
        let _ = writeln!(out, "\nEarliest year of birth: {}", years.earliest);
        let _ = writeln!(out, "Most recent year of birth: {}", years.latest);
        let _ = writeln!(out, "Most common year of birth: {}", years.most_common);
    }
    if u.user_types.is_none() && u.genders.is_none() && u.birth_years.is_none() {
        let _ = writeln!(out, "No user information available.");
    }
    took(&mut out, report.timings.users);

    out
}

/// Pretty-printed JSON for a report.
pub fn report_json(report: &CityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a report to stdout as pretty JSON.
pub fn print_json(report: &CityReport) -> Result<()> {
    println!("{}", report_json(report)?);
    Ok(())
}

/// Renders `rows` as `key: value` blocks, one per trip, numbered from
/// `first_index`. Only columns the table has are shown.
pub fn render_rows(table: &TripTable, rows: &[TripRecord], first_index: usize) -> String {
    let mut out = String::new();

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "[{}]", first_index + i);
        let _ = writeln!(out, "  Start Time: {}", row.start_time);
        for column in table.columns().iter() {
            let value = match column {
                Column::EndTime => row.end_time.map(|t| t.to_string()),
                Column::TripDuration => row.trip_duration.map(|v| v.to_string()),
                Column::StartStation => row.start_station.clone(),
                Column::EndStation => row.end_station.clone(),
                Column::UserType => row.user_type.clone(),
                Column::Gender => row.gender.clone(),
                Column::BirthYear => row.birth_year.map(|v| v.to_string()),
            };
            let _ = writeln!(out, "  {}: {}", column.header(), value.unwrap_or_default());
        }
        let _ = writeln!(out, "  Month: {}", row.month());
        let _ = writeln!(out, "  Day of Week: {}", row.day_of_week());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{City, Schema};
    use crate::report::CityReport;
    use chrono::NaiveDate;

    fn table() -> TripTable {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        TripTable::new(
            City::Washington,
            City::Washington.schema(),
            vec![
                TripRecord::new(ts)
                    .with_duration(10.0)
                    .with_stations("A", "B")
                    .with_user_type("Subscriber"),
                TripRecord::new(ts)
                    .with_duration(20.0)
                    .with_stations("A", "B")
                    .with_user_type("Customer"),
            ],
        )
    }

    #[test]
    fn test_render_report_sections() {
        let report = CityReport::build(&table()).unwrap();
        let text = render_report(&report);
        assert!(text.contains("2 trips for Washington"));
        assert!(text.contains("Most common month: January"));
        assert!(text.contains("Most common day of week: Monday"));
        assert!(text.contains("Most common hour of day: 8"));
        assert!(text.contains("Most common trip from start to end: A to B"));
        assert!(text.contains("Total travel time: 30.0 seconds"));
        assert!(text.contains("Average travel time: 15.0 seconds"));
        assert!(text.contains("Counts of each user type:"));
        assert!(!text.contains("Counts of each gender"));
    }

    #[test]
    fn test_render_empty_report_says_no_data() {
        let empty = TripTable::new(City::Chicago, Schema::default(), vec![]);
        let text = render_report(&CityReport::build(&empty).unwrap());
        assert!(text.contains("Most common month: no data"));
        assert!(text.contains("Most common start station: no data"));
        assert!(text.contains("No user information available."));
    }

    #[test]
    fn test_report_json_round_trips_as_value() {
        let report = CityReport::build(&table()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report_json(&report).unwrap()).unwrap();
        assert_eq!(json["trips"], 2);
        assert_eq!(json["times"]["day"], "monday");
        assert_eq!(json["duration"]["total"], 30.0);
        assert!(json["users"]["genders"].is_null());
    }

    #[test]
    fn test_render_rows_shows_present_columns_only() {
        let t = table();
        let text = render_rows(&t, &t.rows()[..1], 0);
        assert!(text.contains("[0]"));
        assert!(text.contains("Start Station: A"));
        assert!(text.contains("Day of Week: Monday"));
        assert!(!text.contains("Gender"));
    }
}
