use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car Doctor API",
        version = "0.1.0",
        description = "Car service catalogue and booking management."
    ),
    paths(
        crate::routes::issue_token,
        crate::routes::logout,
        crate::routes::list_services,
        crate::routes::get_service,
        crate::routes::create_booking,
        crate::routes::list_bookings,
        crate::routes::delete_booking,
        crate::routes::update_booking_status,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::IdentityRequest,
        crate::dto::LogoutRequest,
        crate::dto::SuccessResponse,
        crate::dto::BookingRequest,
        crate::dto::StatusUpdateRequest,
        crate::dto::InsertResponse,
        crate::dto::DeleteResponse,
        crate::dto::UpdateResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "session", description = "Session cookie issue and removal"),
        (name = "services", description = "Service catalogue"),
        (name = "bookings", description = "Customer bookings"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the `token` cookie security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::with_description(
                            crate::auth::TOKEN_COOKIE,
                            "Session JWT set by POST /jwt.",
                        ),
                    ),
                ),
            );
        }
    }
}
