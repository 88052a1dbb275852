//! The three supported cities and the optional columns each dataset carries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::BikeshareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Lowercase key used at the prompt and in config files.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new york",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Suffix used in `BIKESHARE_<CITY>_FILE` environment overrides.
    pub fn env_name(self) -> &'static str {
        match self {
            City::Chicago => "CHICAGO",
            City::NewYork => "NEW_YORK",
            City::Washington => "WASHINGTON",
        }
    }

    /// Optional columns the city's published dataset is known to carry.
    ///
    /// Washington never publishes rider demographics, so gender and birth
    /// year are left out of its descriptor even if a file happens to have
    /// them.
    pub fn schema(self) -> Schema {
        match self {
            City::Chicago | City::NewYork => Schema::from_columns(Column::ALL),
            City::Washington => Schema::from_columns([
                Column::EndTime,
                Column::TripDuration,
                Column::StartStation,
                Column::EndStation,
                Column::UserType,
            ]),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        };
        write!(f, "{name}")
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new_york" | "new york city" | "nyc" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            _ => Err(BikeshareError::UnknownCity(s.to_string())),
        }
    }
}

/// Optional trip columns. `Start Time` is required and not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Header name in the source CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }
}

/// A set of optional columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema(BTreeSet<Column>);

impl Schema {
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        Schema(columns.into_iter().collect())
    }

    pub fn contains(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_keys() {
        assert_eq!("chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("New York".parse::<City>().unwrap(), City::NewYork);
        assert_eq!(" nyc ".parse::<City>().unwrap(), City::NewYork);
        assert_eq!("WASHINGTON".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_parse_unknown_city() {
        let err = "boston".parse::<City>().unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(ref s) if s == "boston"));
    }

    #[test]
    fn test_key_round_trips() {
        for city in City::ALL {
            assert_eq!(city.key().parse::<City>().unwrap(), city);
        }
    }

    #[test]
    fn test_washington_schema_has_no_demographics() {
        let schema = City::Washington.schema();
        assert!(schema.contains(Column::UserType));
        assert!(!schema.contains(Column::Gender));
        assert!(!schema.contains(Column::BirthYear));
    }

    #[test]
    fn test_chicago_and_new_york_carry_every_column() {
        for city in [City::Chicago, City::NewYork] {
            let schema = city.schema();
            assert!(Column::ALL.iter().all(|c| schema.contains(*c)));
        }
    }
}
