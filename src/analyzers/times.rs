use crate::analyzers::measured;
use crate::analyzers::types::PopularTimes;
use crate::analyzers::utility::mode;
use crate::table::TripTable;

/// Most common month, day of week and hour of day, by start time.
pub fn popular_times(table: &TripTable) -> PopularTimes {
    let rows = table.rows();
    PopularTimes {
        month: measured("most_common_month", || mode(rows.iter().map(|r| r.month()))),
        day: measured("most_common_day", || {
            mode(rows.iter().map(|r| r.day_of_week()))
        }),
        hour: measured("most_common_hour", || mode(rows.iter().map(|r| r.hour()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{City, Schema};
    use crate::filter::{DayOfWeek, Month};
    use crate::table::TripRecord;
    use chrono::NaiveDate;

    fn trip(m: u32, d: u32, h: u32) -> TripRecord {
        TripRecord::new(
            NaiveDate::from_ymd_opt(2017, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_empty_table_has_no_popular_times() {
        let table = TripTable::new(City::Chicago, Schema::default(), vec![]);
        assert_eq!(popular_times(&table), PopularTimes::default());
    }

    #[test]
    fn test_popular_times() {
        let table = TripTable::new(
            City::Chicago,
            Schema::default(),
            vec![
                trip(3, 6, 8),  // Monday
                trip(3, 7, 17), // Tuesday
                trip(4, 3, 8),  // Monday
                trip(3, 14, 8), // Tuesday
            ],
        );
        let times = popular_times(&table);
        assert_eq!(times.month, Some(Month::March));
        // Monday and Tuesday tie; Monday is seen first
        assert_eq!(times.day, Some(DayOfWeek::Monday));
        assert_eq!(times.hour, Some(8));
    }
}
