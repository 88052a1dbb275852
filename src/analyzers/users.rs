use crate::analyzers::measured;
use crate::analyzers::types::{BirthYearStats, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::city::{City, Column};
use crate::error::{BikeshareError, Result};
use crate::table::TripTable;

/// User type counts for every city; gender counts and birth-year summary
/// only where `city`'s schema declares those columns.
pub fn user_stats(table: &TripTable, city: City) -> Result<UserStats> {
    let schema = city.schema();
    let available = |column: Column| schema.contains(column) && table.has_column(column);
    let rows = table.rows();

    let user_types = available(Column::UserType).then(|| {
        measured("user_type_counts", || {
            value_counts(rows.iter().filter_map(|r| r.user_type.as_deref()))
        })
    });

    let genders = available(Column::Gender).then(|| {
        measured("gender_counts", || {
            value_counts(rows.iter().filter_map(|r| r.gender.as_deref()))
        })
    });

    let birth_years = if available(Column::BirthYear) {
        measured("birth_year_stats", || {
            let years = rows
                .iter()
                .filter_map(|r| r.birth_year)
                .map(to_year)
                .collect::<Result<Vec<i32>>>()?;
            Ok::<_, BikeshareError>(birth_year_stats(&years))
        })?
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

/// Truncates a birth year read as a float ("1984.0") to an integer year.
fn to_year(value: f64) -> Result<i32> {
    let year = value.trunc();
    if !year.is_finite() || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(BikeshareError::InvalidBirthYear(value));
    }
    Ok(year as i32)
}
