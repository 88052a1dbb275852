//! In-memory trip rows for one city.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::city::{City, Column, Schema};
use crate::filter::{DayOfWeek, Month, TripFilter};

/// One trip. Optional fields are `None` when the column is absent or the
/// cell is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,

    // derived from start_time
    month: Month,
    day_of_week: DayOfWeek,
}

impl TripRecord {
    pub fn new(start_time: NaiveDateTime) -> Self {
        TripRecord {
            start_time,
            end_time: None,
            trip_duration: None,
            start_station: None,
            end_station: None,
            user_type: None,
            gender: None,
            birth_year: None,
            month: Month::of(&start_time),
            day_of_week: DayOfWeek::of(&start_time),
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn with_stations(mut self, start: &str, end: &str) -> Self {
        self.start_station = Some(start.to_string());
        self.end_station = Some(end.to_string());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.trip_duration = Some(seconds);
        self
    }

    pub fn with_user_type(mut self, user_type: &str) -> Self {
        self.user_type = Some(user_type.to_string());
        self
    }

    pub fn with_demographics(mut self, gender: &str, birth_year: f64) -> Self {
        self.gender = Some(gender.to_string());
        self.birth_year = Some(birth_year);
        self
    }
}

/// Trips for one city in source order, plus the optional columns the source
/// actually had.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripTable {
    city: City,
    columns: Schema,
    rows: Vec<TripRecord>,
    skipped_rows: usize,
}

impl TripTable {
    pub fn new(city: City, columns: Schema, rows: Vec<TripRecord>) -> Self {
        TripTable {
            city,
            columns,
            rows,
            skipped_rows: 0,
        }
    }

    pub(crate) fn with_skipped_rows(mut self, skipped: usize) -> Self {
        self.skipped_rows = skipped;
        self
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn columns(&self) -> &Schema {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(column)
    }

    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped at load time because their start time did not parse.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// A copy holding only the rows that match `filter`, in the same order.
    pub fn filtered(&self, filter: &TripFilter) -> TripTable {
        if filter.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|r| filter.matches(r.month, r.day_of_week))
            .cloned()
            .collect();
        TripTable {
            city: self.city,
            columns: self.columns.clone(),
            rows,
            skipped_rows: self.skipped_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn sample() -> TripTable {
        TripTable::new(
            City::Chicago,
            Schema::default(),
            vec![
                TripRecord::new(at(1, 2, 8)),  // Monday
                TripRecord::new(at(2, 6, 9)),  // Monday
                TripRecord::new(at(1, 3, 17)), // Tuesday
            ],
        )
    }

    #[test]
    fn test_derived_fields() {
        let r = TripRecord::new(at(1, 2, 8));
        assert_eq!(r.month(), Month::January);
        assert_eq!(r.day_of_week(), DayOfWeek::Monday);
        assert_eq!(r.hour(), 8);
    }

    #[test]
    fn test_derived_fields_ignore_position() {
        let table = sample();
        let again = TripRecord::new(table.rows()[2].start_time);
        assert_eq!(again, table.rows()[2]);
    }

    #[test]
    fn test_filter_by_day_preserves_order() {
        let table = sample();
        let filter = TripFilter {
            month: None,
            day: Some(DayOfWeek::Monday),
        };
        let mondays = table.filtered(&filter);
        assert_eq!(mondays.len(), 2);
        assert_eq!(mondays.rows()[0].month(), Month::January);
        assert_eq!(mondays.rows()[1].month(), Month::February);
        // source untouched
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = TripFilter {
            month: Some(Month::January),
            day: None,
        };
        let once = sample().filtered(&filter);
        let twice = once.filtered(&filter);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let table = sample();
        assert_eq!(table.filtered(&TripFilter::none()), table);
    }
}
