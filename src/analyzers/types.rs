//! Result types returned by the aggregators.
//!
//! Every statistic is optional: `None` means the column was absent or held
//! no values, never a placeholder.

use serde::Serialize;

use crate::filter::{DayOfWeek, Month};

/// Most common month, day of week and start hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopularTimes {
    pub month: Option<Month>,
    pub day: Option<DayOfWeek>,
    pub hour: Option<u32>,
}

/// Most common start station, end station and start-to-end trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopularStations {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub trip: Option<String>,
}

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationStats {
    pub total: Option<f64>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Distinct values with their counts, highest first.
pub type FrequencyTable = Vec<ValueCount>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Option<FrequencyTable>,
    pub genders: Option<FrequencyTable>,
    pub birth_years: Option<BirthYearStats>,
}
