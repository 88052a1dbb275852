//! Reads a city's trips from a [`TripSource`], derives calendar fields and
//! applies the month/day filter.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::city::{City, Column, Schema};
use crate::error::{BikeshareError, Result};
use crate::filter::TripFilter;
use crate::source::{SourceRow, SourceTable, TripSource};
use crate::table::{TripRecord, TripTable};

const START_TIME: &str = "Start Time";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// What to do with a row whose start time does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampPolicy {
    /// Drop the row, log a warning and count it in [`TripTable::skipped_rows`].
    #[default]
    Skip,
    /// Fail the load with [`BikeshareError::MalformedTimestamp`].
    Abort,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub timestamp_policy: TimestampPolicy,
}

/// Loads `city` (a prompt-style key such as `"new york"`) and keeps the
/// rows matching `month` and `day`. `None` or `"all"` disables a filter.
pub fn load<S: TripSource + ?Sized>(
    source: &S,
    city: &str,
    month: Option<&str>,
    day: Option<&str>,
) -> Result<TripTable> {
    let city: City = city.parse()?;
    let filter = TripFilter::from_names(month, day)?;
    load_city(source, city, &filter, &LoadOptions::default())
}

#[tracing::instrument(skip(source, options))]
pub fn load_city<S: TripSource + ?Sized>(
    source: &S,
    city: City,
    filter: &TripFilter,
    options: &LoadOptions,
) -> Result<TripTable> {
    let raw = source.read_table(city)?;
    let table = parse_table(city, &raw, options)?;
    let filtered = table.filtered(filter);

    info!(
        source = raw.location(),
        loaded = table.len(),
        kept = filtered.len(),
        skipped = table.skipped_rows(),
        "Trip table loaded"
    );
    Ok(filtered)
}

/// Column indices for the optional fields found in the header.
struct ColumnMap {
    start_time: usize,
    optional: Vec<(Column, usize)>,
}

impl ColumnMap {
    fn resolve(raw: &SourceTable) -> Result<Self> {
        let start_time = raw
            .column(START_TIME)
            .ok_or_else(|| BikeshareError::MissingStartTime {
                location: raw.location().to_string(),
            })?;
        let optional = Column::ALL
            .into_iter()
            .filter_map(|c| raw.column(c.header()).map(|idx| (c, idx)))
            .collect();
        Ok(ColumnMap {
            start_time,
            optional,
        })
    }

    fn schema(&self) -> Schema {
        Schema::from_columns(self.optional.iter().map(|(c, _)| *c))
    }
}

fn parse_table(city: City, raw: &SourceTable, options: &LoadOptions) -> Result<TripTable> {
    let columns = ColumnMap::resolve(raw)?;
    debug!(columns = ?columns.schema(), "Resolved optional columns");

    let mut rows = Vec::with_capacity(raw.rows().len());
    let mut skipped = 0usize;

    for row in raw.rows() {
        let cell = SourceTable::cell(row, columns.start_time).unwrap_or("");
        let start_time = match parse_timestamp(cell) {
            Some(ts) => ts,
            None => match options.timestamp_policy {
                TimestampPolicy::Abort => {
                    return Err(BikeshareError::MalformedTimestamp {
                        line: row.line,
                        value: cell.to_string(),
                    });
                }
                TimestampPolicy::Skip => {
                    warn!(line = row.line, value = cell, "Skipping row with malformed start time");
                    skipped += 1;
                    continue;
                }
            },
        };

        rows.push(parse_record(start_time, row, &columns)?);
    }

    Ok(TripTable::new(city, columns.schema(), rows).with_skipped_rows(skipped))
}

fn parse_record(start_time: NaiveDateTime, row: &SourceRow, columns: &ColumnMap) -> Result<TripRecord> {
    let mut record = TripRecord::new(start_time);

    for &(column, idx) in &columns.optional {
        let Some(value) = SourceTable::cell(row, idx) else {
            continue;
        };
        match column {
            // End times are informational only; a bad one is treated as missing.
            Column::EndTime => record.end_time = parse_timestamp(value),
            Column::TripDuration => record.trip_duration = Some(parse_number(value, row, column)?),
            Column::StartStation => record.start_station = Some(value.to_string()),
            Column::EndStation => record.end_station = Some(value.to_string()),
            Column::UserType => record.user_type = Some(value.to_string()),
            Column::Gender => record.gender = Some(value.to_string()),
            Column::BirthYear => record.birth_year = Some(parse_number(value, row, column)?),
        }
    }

    Ok(record)
}

/// Parses a start/end time in any of the layouts the city datasets use.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parses a finite number. `inf` and friends are rejected like any other
/// non-numeric text.
fn parse_number(value: &str, row: &SourceRow, column: Column) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| BikeshareError::InvalidValue {
            line: row.line,
            column: column.header(),
            value: value.to_string(),
        })
}
