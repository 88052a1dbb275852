use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::analyzers::types::{DurationStats, PopularStations, PopularTimes, UserStats};
use crate::analyzers::{duration_stats, popular_stations, popular_times, user_stats};
use crate::city::City;
use crate::error::Result;
use crate::table::TripTable;

/// Wall-clock time spent on each report section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionTimings {
    pub times: Duration,
    pub stations: Duration,
    pub duration: Duration,
    pub users: Duration,
}

/// All statistics for one loaded table.
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub trips: usize,
    pub skipped_rows: usize,
    pub times: PopularTimes,
    pub stations: PopularStations,
    pub duration: DurationStats,
    pub users: UserStats,

    #[serde(skip)]
    pub timings: SectionTimings,
}

impl CityReport {
    #[tracing::instrument(skip_all, fields(city = %table.city(), trips = table.len()))]
    pub fn build(table: &TripTable) -> Result<Self> {
        let mut timings = SectionTimings::default();

        let started = Instant::now();
        let times = popular_times(table);
        timings.times = started.elapsed();

        let started = Instant::now();
        let stations = popular_stations(table);
        timings.stations = started.elapsed();

        let started = Instant::now();
        let duration = duration_stats(table);
        timings.duration = started.elapsed();

        let started = Instant::now();
        let users = user_stats(table, table.city())?;
        timings.users = started.elapsed();

        tracing::debug!(?timings, "Report built");

        Ok(CityReport {
            generated_at: Utc::now(),
            city: table.city(),
            trips: table.len(),
            skipped_rows: table.skipped_rows(),
            times,
            stations,
            duration,
            users,
            timings,
        })
    }
}
