pub mod analyzers;
pub mod city;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pager;
pub mod prompt;
pub mod report;
pub mod source;
pub mod table;

pub use city::City;
pub use error::{BikeshareError, Result};
pub use loader::load;
pub use table::{TripRecord, TripTable};
