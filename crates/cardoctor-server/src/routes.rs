use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cardoctor_core::authorize_booking_query;
use cardoctor_core::models::Identity;

use crate::auth::require_session;
use crate::dto::{
    BookingQuery, BookingRequest, DeleteResponse, HealthResponse, IdentityRequest,
    InsertResponse, LogoutRequest, StatusUpdateRequest, SuccessResponse, UpdateResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router. Only `GET /booking` sits behind the session check.
pub fn router(state: Arc<AppState>) -> Router {
    let session = middleware::from_fn_with_state(state.clone(), require_session);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
        .route("/services", get(list_services))
        .route("/service/{id}", get(get_service))
        .route(
            "/booking",
            get(list_bookings)
                .route_layer(session)
                .post(create_booking),
        )
        .route(
            "/booking/{id}",
            delete(delete_booking).patch(update_booking_status),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

pub async fn root() -> &'static str {
    "Hello from Car Doctor"
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 422, description = "Body is not a JSON object"),
    ),
    tag = "session"
)]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<IdentityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = Identity::from(body);
    tracing::debug!(email = ?identity.email(), "issuing session");

    let token = state.tokens.issue(identity)?;
    let jar = jar.add(state.cookies.session_cookie(token));

    Ok((jar, Json(SuccessResponse::ok())))
}

#[utoipa::path(
    post,
    path = "/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse),
    ),
    tag = "session"
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Option<Json<LogoutRequest>>,
) -> impl IntoResponse {
    tracing::info!(user = ?body.map(|Json(b)| b.0), "logout");

    let jar = jar.add(state.cookies.removal_cookie());
    (jar, Json(SuccessResponse::ok()))
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Every service document"),
    ),
    tag = "services"
)]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let services = state.db.service_repo().list().await?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/service/{id}",
    params(
        ("id" = String, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service summary, or null when no service has this id"),
        (status = 400, description = "Malformed id", body = crate::dto::ErrorResponse),
    ),
    tag = "services"
)]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // A miss is a 200 with a null body, not a 404
    let summary = state.db.service_repo().get_summary(&id).await?;
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/booking",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking stored", body = InsertResponse),
        (status = 422, description = "Body is not a JSON object"),
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.db.booking_repo().create(body.into()).await?;

    Ok(Json(InsertResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/booking",
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings for the requested email"),
        (status = 401, description = "Missing or invalid session", body = crate::dto::ErrorResponse),
        (status = 403, description = "Email does not match the session", body = crate::dto::ErrorResponse),
    ),
    security(("session_cookie" = [])),
    tag = "bookings"
)]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize_booking_query(&identity, query.email.as_deref())?;

    // An empty `email=` filters nothing
    let filter = query.email.as_deref().filter(|email| !email.is_empty());
    let bookings = state.db.booking_repo().list(filter).await?;

    Ok(Json(bookings))
}

#[utoipa::path(
    delete,
    path = "/booking/{id}",
    params(
        ("id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Delete acknowledged; deletedCount is 0 for unknown ids", body = DeleteResponse),
        (status = 400, description = "Malformed id", body = crate::dto::ErrorResponse),
    ),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.db.booking_repo().delete(&id).await?;
    Ok(Json(DeleteResponse::from(result)))
}

#[utoipa::path(
    patch,
    path = "/booking/{id}",
    params(
        ("id" = String, Path, description = "Booking ID")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateResponse),
        (status = 400, description = "Malformed id", body = crate::dto::ErrorResponse),
    ),
    tag = "bookings"
)]
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .db
        .booking_repo()
        .update_status(&id, body.status)
        .await?;

    Ok(Json(UpdateResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            "error"
        }
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, Json(response))
}
