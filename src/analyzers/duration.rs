use crate::analyzers::measured;
use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::{mean, sum};
use crate::city::Column;
use crate::table::TripTable;

/// Total and average trip duration over rows that have one. Values are
/// taken as-is, negative or outlying durations included.
pub fn duration_stats(table: &TripTable) -> DurationStats {
    if !table.has_column(Column::TripDuration) {
        return DurationStats::default();
    }

    let durations: Vec<f64> = table.rows().iter().filter_map(|r| r.trip_duration).collect();

    DurationStats {
        total: measured("total_travel_time", || sum(&durations)),
        average: measured("average_travel_time", || mean(&durations)),
    }
}
