// Location history core - records position samples and serves day-grouped views
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::history_service::HistoryService;
pub use application::location_log::LocationLogStore;
pub use domain::location::{DailyLocationGroup, LocationPoint};
pub use domain::zone::ZonePolicy;
pub use error::LogError;
