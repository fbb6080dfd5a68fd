use serde_json::Value;

use crate::error::AppError;
use crate::models::Identity;

/// A caller may only list the bookings of the email their credential was
/// issued for.
///
/// The `email` claim and the requested email are compared as given: both
/// absent is a match, one absent is not, and a non-string claim never matches
/// a requested email.
pub fn authorize_booking_query(
    identity: &Identity,
    requested_email: Option<&str>,
) -> Result<(), AppError> {
    let allowed = match (identity.email_claim(), requested_email) {
        (None, None) => true,
        (Some(Value::String(claimed)), Some(requested)) => claimed == requested,
        _ => false,
    };

    if !allowed {
        tracing::warn!(
            claimed = ?identity.email_claim(),
            requested = ?requested_email,
            "booking query rejected"
        );
        return Err(AppError::Forbidden);
    }

    Ok(())
}
