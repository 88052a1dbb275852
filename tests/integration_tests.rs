use bikeshare_stats::analyzers::{duration_stats, popular_stations, popular_times, user_stats};
use bikeshare_stats::city::Column;
use bikeshare_stats::filter::{DayOfWeek, Month, TripFilter};
use bikeshare_stats::loader::{LoadOptions, TimestampPolicy, load_city};
use bikeshare_stats::output::render_report;
use bikeshare_stats::report::CityReport;
use bikeshare_stats::source::CsvDirSource;
use bikeshare_stats::{BikeshareError, City, load};
use std::path::PathBuf;

fn fixtures() -> CsvDirSource {
    CsvDirSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

#[test]
fn test_full_pipeline_chicago() {
    let table = load(&fixtures(), "chicago", None, None).expect("Failed to load chicago");
    assert_eq!(table.len(), 10);

    let times = popular_times(&table);
    assert_eq!(times.month, Some(Month::January));
    assert_eq!(times.day, Some(DayOfWeek::Monday));
    // 9h and 14h both appear twice; 14h comes first
    assert_eq!(times.hour, Some(14));

    let stations = popular_stations(&table);
    assert_eq!(
        stations.start_station.as_deref(),
        Some("Clinton St & Washington Blvd")
    );
    assert_eq!(stations.end_station.as_deref(), Some("Canal St & Madison St"));
    assert_eq!(
        stations.trip.as_deref(),
        Some("Clinton St & Washington Blvd to Canal St & Madison St")
    );

    let duration = duration_stats(&table);
    assert_eq!(duration.total, Some(5481.0));
    assert_eq!(duration.average, Some(548.1));

    let users = user_stats(&table, City::Chicago).unwrap();
    let types = users.user_types.unwrap();
    assert_eq!((types[0].value.as_str(), types[0].count), ("Subscriber", 8));
    assert_eq!((types[1].value.as_str(), types[1].count), ("Customer", 2));
    let genders = users.genders.unwrap();
    assert_eq!((genders[0].value.as_str(), genders[0].count), ("Male", 6));
    let years = users.birth_years.unwrap();
    assert_eq!(years.earliest, 1975);
    assert_eq!(years.latest, 1992);
    assert_eq!(years.most_common, 1990);
}

#[test]
fn test_month_filter_keeps_only_that_month() {
    let all = load(&fixtures(), "chicago", None, None).unwrap();
    let january = load(&fixtures(), "chicago", Some("january"), None).unwrap();

    let expected = all
        .rows()
        .iter()
        .filter(|r| r.month() == Month::January)
        .count();
    assert_eq!(january.len(), expected);
    assert_eq!(january.len(), 3);
    assert!(january.rows().iter().all(|r| r.month() == Month::January));
}

#[test]
fn test_day_filter_then_refilter_is_stable() {
    let mondays = load(&fixtures(), "chicago", None, Some("Monday")).unwrap();
    assert_eq!(mondays.len(), 3);

    let filter = TripFilter::from_names(None, Some("monday")).unwrap();
    assert_eq!(mondays.filtered(&filter), mondays);
}

#[test]
fn test_new_york_skips_bad_timestamp() {
    let table = load(&fixtures(), "new york", None, None).unwrap();
    assert_eq!(table.len(), 7);
    assert_eq!(table.skipped_rows(), 1);

    let times = popular_times(&table);
    // June, May and March tie at two trips each; June is seen first
    assert_eq!(times.month, Some(Month::June));
    assert_eq!(times.day, Some(DayOfWeek::Wednesday));
    assert_eq!(times.hour, Some(7));

    let stations = popular_stations(&table);
    assert_eq!(stations.trip.as_deref(), Some("1 Ave & E 44 St to E 53 St & 3 Ave"));

    let years = user_stats(&table, City::NewYork).unwrap().birth_years.unwrap();
    assert_eq!(years.earliest, 1981);
    assert_eq!(years.latest, 1998);
    assert_eq!(years.most_common, 1986);
}

#[test]
fn test_new_york_strict_load_fails() {
    let options = LoadOptions {
        timestamp_policy: TimestampPolicy::Abort,
    };
    let err = load_city(&fixtures(), City::NewYork, &TripFilter::none(), &options).unwrap_err();
    assert!(matches!(err, BikeshareError::MalformedTimestamp { line: 9, .. }));
}

#[test]
fn test_washington_has_no_demographics() {
    let table = load(&fixtures(), "washington", None, None).unwrap();
    assert_eq!(table.len(), 5);
    assert!(!table.has_column(Column::Gender));

    let users = user_stats(&table, City::Washington).unwrap();
    assert!(users.user_types.is_some());
    assert!(users.genders.is_none());
    assert!(users.birth_years.is_none());

    let duration = duration_stats(&table);
    let total = duration.total.unwrap();
    assert!((total - 4905.634).abs() < 1e-9);
    assert!((duration.average.unwrap() * table.len() as f64 - total).abs() < 1e-9);

    let times = popular_times(&table);
    assert_eq!(times.day, Some(DayOfWeek::Saturday));
    assert_eq!(times.hour, Some(8));
}

#[test]
fn test_filter_with_no_matches_reports_no_data() {
    let table = load(&fixtures(), "washington", Some("december"), None).unwrap();
    assert!(table.is_empty());

    let report = CityReport::build(&table).unwrap();
    assert_eq!(report.times.month, None);
    assert_eq!(report.duration.total, None);
    assert!(render_report(&report).contains("Most common month: no data"));
}

#[test]
fn test_unknown_city_is_rejected() {
    assert!(matches!(
        load(&fixtures(), "boston", None, None),
        Err(BikeshareError::UnknownCity(_))
    ));
}

#[test]
fn test_missing_data_dir_is_unavailable() {
    let source = CsvDirSource::new("/nonexistent/bikeshare");
    assert!(matches!(
        load(&source, "chicago", None, None),
        Err(BikeshareError::SourceUnavailable { .. })
    ));
}
