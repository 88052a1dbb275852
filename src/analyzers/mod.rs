//! Read-only aggregations over a loaded [`TripTable`](crate::table::TripTable).
//!
//! Each aggregator checks which optional columns the table has and
//! computes only the statistics those columns support. Every individual
//! statistic runs inside a debug-level span so its duration shows up in the
//! diagnostic log.

pub mod duration;
pub mod stations;
pub mod times;
pub mod types;
pub mod users;
pub mod utility;

pub use duration::duration_stats;
pub use stations::popular_stations;
pub use times::popular_times;
pub use users::user_stats;

pub(crate) fn measured<T>(stat: &'static str, f: impl FnOnce() -> T) -> T {
    tracing::debug_span!("stat", name = stat).in_scope(f)
}
