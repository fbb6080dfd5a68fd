pub mod access;
pub mod error;
pub mod models;
pub mod token;

pub use access::authorize_booking_query;
pub use error::AppError;
pub use models::{
    Booking, DeleteResult, Identity, InsertResult, NewBooking, Service, ServiceSummary,
    UpdateResult,
};
pub use token::TokenIssuer;
