pub mod aggregation;
pub mod app;
pub mod error;
pub mod filter;
pub mod model;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod schema;
pub mod session;
pub mod viewer;

pub use error::BikeshareError;
pub use filter::{City, DayFilter, FilterSelection, MonthFilter};
pub use model::TripTable;
