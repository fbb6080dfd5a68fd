use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use cardoctor_core::models::{DeleteResult, Identity, InsertResult, NewBooking, UpdateResult};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Any JSON object; it is signed into the session credential as-is.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct IdentityRequest(pub Map<String, Value>);

impl From<IdentityRequest> for Identity {
    fn from(req: IdentityRequest) -> Self {
        Identity::new(req.0)
    }
}

/// Whatever the client sends on logout. Only logged.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct LogoutRequest(pub Value);

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// Booking as submitted by the customer, stored verbatim.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct BookingRequest(pub Map<String, Value>);

impl From<BookingRequest> for NewBooking {
    fn from(req: BookingRequest) -> Self {
        NewBooking::from_body(req.0)
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BookingQuery {
    /// Customer email; must match the session's email claim
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdateRequest {
    /// Free-form status, e.g. "confirmed". Omitting it stores null.
    pub status: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<InsertResult> for InsertResponse {
    fn from(r: InsertResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            inserted_id: r.inserted_id,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(r: DeleteResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            deleted_count: r.deleted_count,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(r: UpdateResult) -> Self {
        Self {
            acknowledged: r.acknowledged,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_count: u64::from(r.upserted_id.is_some()),
            upserted_id: r.upserted_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
