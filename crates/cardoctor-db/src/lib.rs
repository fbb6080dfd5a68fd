pub mod booking_repository;
pub mod config;
pub mod database;
pub mod documents;
pub mod service_repository;

pub use booking_repository::BookingRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use service_repository::ServiceRepository;
