//! Month and day-of-week filters.
//!
//! [`Month`] and [`DayOfWeek`] are the single source of truth for parsing a
//! filter name, translating it to a calendar index and displaying it.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::city::City;
use crate::error::BikeshareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Calendar number, 1 for January through 12 for December.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }

    pub fn of(ts: &NaiveDateTime) -> Month {
        // chrono guarantees month() is within 1..=12
        Month::ALL[ts.month0() as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.name()))
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| BikeshareError::UnknownMonth(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn of(ts: &NaiveDateTime) -> DayOfWeek {
        DayOfWeek::from(ts.weekday())
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        DayOfWeek::ALL[w.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.name()))
    }
}

impl FromStr for DayOfWeek {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| BikeshareError::UnknownDay(s.to_string()))
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Row filter applied by the loader. `None` means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub month: Option<Month>,
    pub day: Option<DayOfWeek>,
}

impl TripFilter {
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a filter from user-facing names, where `"all"` (or an absent
    /// value) disables that half of the filter.
    pub fn from_names(month: Option<&str>, day: Option<&str>) -> Result<Self, BikeshareError> {
        let month = match month.map(str::trim) {
            Some(m) if !m.eq_ignore_ascii_case("all") => Some(m.parse()?),
            _ => None,
        };
        let day = match day.map(str::trim) {
            Some(d) if !d.eq_ignore_ascii_case("all") => Some(d.parse()?),
            _ => None,
        };
        Ok(TripFilter { month, day })
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    pub fn matches(&self, month: Month, day: DayOfWeek) -> bool {
        self.month.is_none_or(|m| m == month) && self.day.is_none_or(|d| d == day)
    }
}

/// The time window chosen by the user. Month and day are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    Month(Month),
    Day(DayOfWeek),
}

/// A complete selection: which city, and which slice of its trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub period: Period,
}

impl FilterSpec {
    pub fn trip_filter(&self) -> TripFilter {
        match self.period {
            Period::All => TripFilter::none(),
            Period::Month(m) => TripFilter {
                month: Some(m),
                day: None,
            },
            Period::Day(d) => TripFilter {
                month: None,
                day: Some(d),
            },
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period {
            Period::All => write!(f, "{}, all trips", self.city),
            Period::Month(m) => write!(f, "{}, trips in {m}", self.city),
            Period::Day(d) => write!(f, "{}, trips on {d}s", self.city),
        }
    }
}
